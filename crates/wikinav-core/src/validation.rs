//! Path validation against the live link graph

use crate::error::Result;
use crate::graph::{LinkGraph, LinkLookup};
use crate::title::ArticleTitle;
use serde::{Deserialize, Serialize};

/// What to do with a hop whose source article does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPagePolicy {
    /// Pass over the hop without recording anything
    #[default]
    Skip,
    /// Record a missing-page error for the hop
    Record,
}

/// Knobs for the validator; the default reproduces the benchmark's scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    #[serde(default)]
    pub missing_pages: MissingPagePolicy,

    /// Record a disambiguation error whenever a step lands on a disambiguation page
    #[serde(default)]
    pub flag_disambiguation: bool,
}

/// A single problem found in a path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathError {
    /// `to` is not among the outgoing links of `from`
    IllegalHop {
        from: ArticleTitle,
        to: ArticleTitle,
    },
    /// `at` exists but links nowhere
    NoOutgoingLinks { at: ArticleTitle },
    /// `at` does not exist (only under [`MissingPagePolicy::Record`])
    MissingPage { at: ArticleTitle },
    /// `at` is a disambiguation page resolved to `target`
    Disambiguation {
        at: ArticleTitle,
        target: ArticleTitle,
    },
    /// Validation failed unexpectedly; the path could not be checked
    NoCorrectPath,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalHop { from, to } => write!(f, "NO LINK: {} -> {}", from, to),
            Self::NoOutgoingLinks { at } => write!(f, "NO PAGE: {}", at),
            Self::MissingPage { at } => write!(f, "MISSING PAGE: {}", at),
            Self::Disambiguation { at, target } => {
                write!(f, "DISAMBIGUATION: {} -> {}", at, target)
            }
            Self::NoCorrectPath => write!(f, "NO CORRECT PATH"),
        }
    }
}

/// Error totals per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub no_link: usize,
    pub no_page: usize,
    pub disambiguation: usize,
    pub missing_page: usize,
}

impl ErrorCounts {
    pub fn tally(errors: &[PathError]) -> Self {
        let mut counts = Self::default();
        for error in errors {
            match error {
                PathError::IllegalHop { .. } => counts.no_link += 1,
                PathError::NoOutgoingLinks { .. } => counts.no_page += 1,
                PathError::Disambiguation { .. } => counts.disambiguation += 1,
                PathError::MissingPage { .. } => counts.missing_page += 1,
                PathError::NoCorrectPath => {}
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.no_link + self.no_page + self.disambiguation + self.missing_page
    }
}

/// Result of validating one path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<PathError>,
    pub counts: ErrorCounts,
    /// True when validation collapsed to [`PathError::NoCorrectPath`]
    pub aborted: bool,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<PathError>) -> Self {
        let counts = ErrorCounts::tally(&errors);
        Self {
            errors,
            counts,
            aborted: false,
        }
    }

    /// Coarse fallback: one marker, all counts zero
    pub fn aborted() -> Self {
        Self {
            errors: vec![PathError::NoCorrectPath],
            counts: ErrorCounts::default(),
            aborted: true,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

/// Checks every hop of a path against a [`LinkGraph`]
pub struct PathValidator<'a, G: LinkGraph + ?Sized> {
    graph: &'a G,
    policy: ValidationPolicy,
}

impl<'a, G: LinkGraph + ?Sized> PathValidator<'a, G> {
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            policy: ValidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate a path. Never fails: any lookup error degrades to an aborted report.
    pub async fn validate(&self, path: &[ArticleTitle]) -> ValidationReport {
        match self.check_hops(path).await {
            Ok(errors) => {
                tracing::debug!(
                    "Validated path of {} steps: {} errors",
                    path.len(),
                    errors.len()
                );
                ValidationReport::from_errors(errors)
            }
            Err(e) => {
                tracing::warn!("Path validation aborted: {}", e);
                ValidationReport::aborted()
            }
        }
    }

    async fn check_hops(&self, path: &[ArticleTitle]) -> Result<Vec<PathError>> {
        let mut errors = Vec::new();

        for pair in path.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);

            let outgoing = match self.graph.outgoing_links(prev).await? {
                LinkLookup::Missing => {
                    tracing::debug!("No page for {}, {:?}", prev, self.policy.missing_pages);
                    if self.policy.missing_pages == MissingPagePolicy::Record {
                        errors.push(PathError::MissingPage { at: prev.clone() });
                    }
                    continue;
                }
                LinkLookup::Found(outgoing) => outgoing,
            };

            if self.policy.flag_disambiguation && outgoing.redirected_from.is_some() {
                errors.push(PathError::Disambiguation {
                    at: prev.clone(),
                    target: outgoing.title.clone(),
                });
            }

            if outgoing.links.is_empty() {
                errors.push(PathError::NoOutgoingLinks { at: prev.clone() });
            } else if !outgoing.contains(next) {
                errors.push(PathError::IllegalHop {
                    from: prev.clone(),
                    to: next.clone(),
                });
            }
        }

        Ok(errors)
    }
}
