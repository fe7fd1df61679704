//! LLM-backed ad option and asset pack generation.
//!
//! One request per call to an OpenAI-compatible endpoint. Model output is
//! treated as untyped JSON and pushed through the same sanitizers as the
//! rule-based path, so limits hold regardless of what the model returns.

pub mod assets;
pub mod config;
pub mod generator;
pub mod normalize;
pub mod prompt;
pub mod providers;
pub mod response;
pub mod types;

pub use assets::AssetPackGenerator;
pub use config::LLMConfig;
pub use generator::{rule_based_outcome, with_fallback, LlmAdGenerator, FALLBACK_MARKER};
pub use normalize::normalize_ai_options;
pub use providers::test_api_key;
pub use response::{extract_response_text, parse_json_from_model_text};
pub use types::*;
