//! `afgjobs-core`: shared building blocks for the job board.
//!
//! This crate contains **pure** primitives (no storage, no IO): identifiers,
//! the domain error model, the clock abstraction and input-shape validation.

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{JobId, UserId};
