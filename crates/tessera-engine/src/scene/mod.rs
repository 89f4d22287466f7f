//! Scene graph primitives.
//!
//! Responsibilities:
//! - define the [`Element`] capability trait and the shared [`Node`] state
//! - provide deterministic compositing order (z-index + insertion order) via [`ZOrder`]
//! - keep element kinds isolated per file under `scene::shapes`

mod element;
mod key;
mod motion;
mod z_index;
mod z_order;

pub mod shapes;

pub use element::{Element, ElementId, Node, UpdateCtx};
pub use key::ZOrderKey;
pub use motion::Motion;
pub use shapes::{Block, Label, Sprite};
pub use z_index::ZIndex;
pub use z_order::ZOrder;
