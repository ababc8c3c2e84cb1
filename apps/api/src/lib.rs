//! Resume analysis and deterministic scoring.
//!
//! Plain text in, a fully populated [`AnalysisResult`] out. The same text and config always
//! produce the same result; no call after [`ResumeEngine::new`] can fail.

pub mod analyzers;
pub mod engine;
pub mod lexicon;
pub mod models;
pub mod recommendations;
pub mod scoring;
pub mod sections;
pub mod text;

pub use engine::{GateOutcome, ResumeEngine};
pub use lexicon::{ConfigError, EngineConfig};
pub use models::analysis::AnalysisResult;
