//! Error handling for cst-filter.
//!
//! Every fallible operation in the crate returns [`FilterError`]. The type is
//! a `thiserror` enum with a hand-written `miette::Diagnostic` implementation,
//! so the CLI can render any failure as a report with a stable error code,
//! a help line and, for parse errors, a labelled source snippet.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

/// Shared named source used by parse diagnostics.
pub type SourceArc = Arc<NamedSource<String>>;

/// Crate-wide result alias.
pub type FilterResult<T> = Result<T, FilterError>;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// Name and text of the input being parsed, kept for error reporting.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Context for text that did not come from a file.
    pub fn inline(content: impl Into<String>) -> Self {
        Self::from_file("<input>", content)
    }

    pub fn to_named_source(&self) -> SourceArc {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// All failure modes of parsing, configuring and filtering.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The bundled front end rejected its input.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        source_code: SourceArc,
        span: Span,
    },

    /// A rule-set file could not be read or understood.
    #[error("Configuration error in {origin}: {message}")]
    Config { origin: String, message: String },

    /// Every fragment under the root was removed.
    #[error("Filtering removed the whole tree: nothing survived under root `{root}`")]
    NoSurvivingRoot { root: String },

    /// The root was elided while more than one fragment survived beneath it.
    #[error("Filtering left {count} detached fragments under elided root `{root}`")]
    DetachedFragments { root: String, count: usize },

    /// A JSON tree did not have the expected shape.
    #[error("Invalid JSON tree: {message}")]
    JsonTree { message: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FilterError {
    pub fn config(origin: impl Into<String>, message: impl fmt::Display) -> Self {
        FilterError::Config {
            origin: origin.into(),
            message: message.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FilterError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json_tree(message: impl Into<String>) -> Self {
        FilterError::JsonTree {
            message: message.into(),
        }
    }

    /// Stable diagnostic code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::Parse { .. } => "cst_filter::parse",
            FilterError::Config { .. } => "cst_filter::config",
            FilterError::NoSurvivingRoot { .. } => "cst_filter::engine::no_surviving_root",
            FilterError::DetachedFragments { .. } => "cst_filter::engine::detached_fragments",
            FilterError::JsonTree { .. } => "cst_filter::json",
            FilterError::Io { .. } => "cst_filter::io",
        }
    }

    fn help_text(&self) -> Option<&'static str> {
        match self {
            FilterError::Parse { .. } => {
                Some("check for unbalanced brackets or an unterminated string literal")
            }
            FilterError::Config { .. } => Some(
                "rules are a list of select_kinds, select_text, select_all or exclude_kinds entries",
            ),
            FilterError::NoSurvivingRoot { .. } => Some(
                "add an inclusion rule that matches something in the tree, or stop excluding the root",
            ),
            FilterError::DetachedFragments { .. } => Some(
                "the root kind is excluded without subtree deletion; include or stop excluding the root",
            ),
            FilterError::JsonTree { .. } => {
                Some("expected objects with a `tag` and either `text` or `children`")
            }
            FilterError::Io { .. } => None,
        }
    }
}

impl Diagnostic for FilterError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.error_code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help_text()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            FilterError::Parse { source_code, .. } => Some(source_code.as_ref()),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            FilterError::Parse { span, .. } => {
                let label = LabeledSpan::new_with_span(Some("here".to_string()), to_source_span(*span));
                Some(Box::new(std::iter::once(label)))
            }
            _ => None,
        }
    }
}

/// Converts a crate span into a miette span.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}
