//! Annotab - Tabular text dataset annotation engine
//!
//! Annotab attaches derived metadata columns to tabular text datasets:
//! boolean tags, language codes, perplexity scores, PII flags,
//! spam-likelihood scores and token/byte counts, computed by a family of
//! pluggable analyzers that share one fluent, in-place-mutation contract.
//!
//! # Features
//!
//! - Exact and regex substring tagging (`__tag__<name>` columns)
//! - Single-field language identification (`__language`)
//! - Dual-backend perplexity scoring, statistical or neural (`__perplexity`)
//! - Rule-based PII detection with fixed category columns (`__pii__*`)
//! - Calibrated SEO-spam classification (`__seo_spam__*`)
//! - Byte and subword token counting (`__byte_count__*` / `__token_count__*`)
//! - Parallel, order-preserving row mapping
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use annotab::{Annotator, Dataset, ModelRegistry, Result};
//!
//! fn main() -> Result<()> {
//!     let records = vec![
//!         serde_json::json!({"text": "Buy cheap pills now", "contact": "555-123-4567"}),
//!         serde_json::json!({"text": "An essay on alpine flora", "contact": "n/a"}),
//!     ];
//!     let dataset = Dataset::from_json_records(&records)?;
//!
//!     let mut annotator = Annotator::new(dataset, Arc::new(ModelRegistry::new()));
//!     annotator
//!         .tag_string(&["text"], &["pills"], "pharma")?
//!         .tag_regex(&["contact"], r"\d{3}-\d{3}-\d{4}", "has_phone")?
//!         .detect_pii(&["text", "contact"])?
//!         .count_tokens(&["text"], None)?;
//!
//!     println!("{} rows annotated", annotator.dataset().num_rows());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod error;

// Dataset engine
pub mod data;

// Row text utilities
pub mod text;

// External model capabilities and resolution
pub mod model;

// Analyzers and the pipeline controller
pub mod annotate;

// Re-export commonly used types
pub use error::{Error, Result};

pub use data::{DataSchema, Dataset, FieldType, FieldValue, Record};
pub use model::{
    EntityScanner, Finding, ModelRegistry, ModelResolver, NeuralScorer, NgramModel, Prediction,
    SubwordTokenizer, TextClassifier,
};
pub use annotate::{Annotator, CountMode, PerplexityBackend, RuleEntityScanner};
