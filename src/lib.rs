//! Thesis-advisor matching for Lattes resumes.
//!
//! Two halves: [`lattes`] turns Lattes XML exports into a professor ->
//! specialties map, and [`scoring`] ranks those professors against a
//! thesis topic with a sentence-similarity endpoint. [`AdvisorMatcher`]
//! wires them together:
//!
//! ```ignore
//! use std::sync::Arc;
//! use advisor_match::{AdvisorMatcher, SimilarityClient, BGE_M3_API_URL};
//!
//! let client = SimilarityClient::new(BGE_M3_API_URL, "hf_...");
//! let matcher = AdvisorMatcher::new(Arc::new(client));
//! let resumes = advisor_match::lattes::read_resume_dir("data/resumes")?;
//! let ranking = matcher.suggest("quantum error correction", &resumes).await?;
//! for professor in &ranking.best {
//!     println!("{professor}: {:.1}", ranking.scores[professor]);
//! }
//! ```

pub mod error;
pub mod lattes;
pub mod matcher;
pub mod models;
pub mod scoring;

// Re-export commonly used types
pub use error::{MatchError, Result};
pub use matcher::AdvisorMatcher;
pub use models::{Ranking, ResumeFile, ResumeRecord, SpecialtyMap};
pub use scoring::{SimilarityClient, SimilarityScorer, BGE_M3_API_URL};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
