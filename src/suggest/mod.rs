//! Shell-completion suggestions scraped from the `mise` binary.
//!
//! Suggestion generation is best-effort: a failing generator contributes a
//! single low-priority error entry instead of failing the whole request.
pub mod generator;

use rayon::prelude::*;
use serde::Serialize;

use crate::exec::Executor;

pub use generator::Generator;

/// Priority assigned to error entries so they sort below real suggestions.
pub const ERROR_PRIORITY: u8 = 1;

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Text inserted on completion.
    pub name: String,
    /// Text shown next to the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort priority; unset means the shell default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl Suggestion {
    /// A candidate with no description or priority.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            priority: None,
        }
    }

    /// Attach the text shown next to the candidate.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The degraded entry shown when a generator fails.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            name: "error".to_string(),
            description: Some(message.into()),
            priority: Some(ERROR_PRIORITY),
        }
    }
}

/// Run one generator. Never fails: errors become a single error suggestion.
#[must_use]
pub fn run(executor: &dyn Executor, mise: &str, generator: Generator) -> Vec<Suggestion> {
    executor
        .run(mise, generator.args())
        .and_then(|result| generator.parse(&result.stdout))
        .unwrap_or_else(|e| {
            tracing::debug!("generator {generator} failed: {e:#}");
            vec![Suggestion::error(format!("{e:#}"))]
        })
}

/// Run several generators concurrently, concatenating results in request
/// order.
///
/// When `mise` is not on PATH nothing is spawned and every generator
/// contributes one error entry.
#[must_use]
pub fn gather(executor: &dyn Executor, mise: &str, generators: &[Generator]) -> Vec<Suggestion> {
    if !executor.which(mise) {
        tracing::debug!("{mise} not found on PATH");
        return generators
            .iter()
            .map(|_| Suggestion::error(format!("{mise} not found on PATH")))
            .collect();
    }
    generators
        .par_iter()
        .map(|g| run(executor, mise, *g))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}
