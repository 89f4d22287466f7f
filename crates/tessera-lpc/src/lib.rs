//! Tessera LPC: multi-directional character actors on top of `tessera-engine`.
//!
//! An [`ActionSet`] composes one sprite per action × direction into a single
//! element; exactly one of them is shown at a time. [`LpcSheet`] builds such a
//! set from a standard LPC character sheet.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use tessera_lpc::{Action, Direction, LpcConfig, LpcSheet};
//!
//! let hero = LpcSheet::new(image, LpcConfig::default()).build()?;
//! let id = layer.add(hero.at(64.0, 64.0));
//!
//! // Later, in response to input:
//! let hero = layer.get_mut_as::<ActionSet>(id).unwrap();
//! hero.activate(Action::Walk, Some(Direction::East))?;
//! ```

mod action_set;
mod direction;
mod sheet;

pub use action_set::{ActionSet, ActionSetBuilder};
pub use direction::{Action, Direction};
pub use sheet::{LpcConfig, LpcSheet};
