//! Built-in element kinds.
//!
//! Adding an element kind:
//! - add a module here with a struct owning a [`Node`](crate::scene::Node)
//! - implement [`Element`](crate::scene::Element) for it
//! - re-export it from `scene`

mod block;
mod label;
mod sprite;

pub use block::Block;
pub use label::Label;
pub use sprite::Sprite;
