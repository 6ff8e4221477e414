//! # epic-model
//!
//! Implementations of the [`epic_core::CompletionModel`] boundary:
//!
//! - [`GeminiModel`]: HTTP client for the Gemini `generateContent` API
//! - [`MockModel`]: scripted model for tests, with call counting

pub mod gemini;
pub mod mock;

pub use gemini::GeminiModel;
pub use mock::MockModel;
