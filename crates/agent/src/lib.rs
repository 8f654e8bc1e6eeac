//! Recommendation synthesis engine.
//!
//! Turns a [`UserProfile`](wellnest_core::UserProfile) and one
//! [`HealthLogEntry`](wellnest_core::HealthLogEntry) into an
//! [`AiResponse`](wellnest_core::AiResponse):
//!
//! 1. **Compose** (`prompt`) - coaching instructions plus the output schema
//! 2. **Generate** (`llm`) - exactly one call to the generative backend
//! 3. **Parse** (`response`) - strip code fences, decode, validate shape
//! 4. **Match** (`matcher`) - reconcile suggested categories with the catalog
//!
//! Any failure after composing falls back to the fixed set in `fallback`.
//! `runtime::RecommendationRuntime::synthesize` never returns an error.

pub mod fallback;
pub mod llm;
pub mod matcher;
pub mod prompt;
pub mod response;
pub mod runtime;

pub use llm::{GatewayError, GeminiClient, GenerationRequest, LlmClient};
pub use runtime::{RecommendationRuntime, SynthesisFailure, SynthesisOutcome};
