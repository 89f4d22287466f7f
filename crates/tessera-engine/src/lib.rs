//! Tessera engine crate.
//!
//! This crate owns the 2D scene runtime: drawing surfaces over an abstract
//! canvas, z-ordered element layers with dirty-region repainting, and the
//! frame sequencing used by sprite animation. Backends plug in through
//! [`surface::Canvas`].

pub mod anim;
pub mod assets;
pub mod coords;
pub mod error;
pub mod event;
pub mod layer;
pub mod logging;
pub mod paint;
pub mod panel;
pub mod scene;
pub mod surface;
pub mod time;

pub use error::ConfigError;
