//! # epic-core
//!
//! Core contracts shared by the epic evaluation workflow crates:
//!
//! - [`CompletionModel`]: the boundary to the external natural-language
//!   generation service
//! - [`EpicError`]: the base error taxonomy
//! - [`PacingPolicy`]: quota-protecting delays around generation calls

pub mod error;
pub mod model;
pub mod pacing;

pub use error::{EpicError, Result};
pub use model::CompletionModel;
pub use pacing::PacingPolicy;
