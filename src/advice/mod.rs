//! Remote advice generation
//!
//! The text-generation collaborator. The engine only builds prompt
//! strings; this module sends them to the remote model.

pub mod generator;

pub use generator::{GeneratorError, GroqClient, TextGenerator, DEFAULT_MODEL};
