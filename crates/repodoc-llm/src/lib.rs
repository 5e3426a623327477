//! LLM completion client for repodoc.
//!
//! The documentation aggregator treats the language model as a single
//! synchronous collaborator: prompt in, text out. This crate provides the
//! [`LlmBackend`] trait, a Groq (OpenAI-compatible) implementation, and a
//! mock backend for tests.

pub mod backend;
pub mod error;
pub mod groq;
pub mod types;

pub use backend::{LlmBackend, SharedBackend};
pub use error::{LlmError, Result};
pub use groq::{GroqBackend, GroqConfig};
pub use types::{CompletionRequest, CompletionResponse};

#[cfg(any(test, feature = "testing"))]
pub use backend::MockBackend;
