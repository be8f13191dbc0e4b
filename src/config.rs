//! Declarative rule-set configuration.
//!
//! A rule set is a YAML or JSON document listing rules in evaluation order:
//!
//! ```yaml
//! rules:
//!   - select_kinds:
//!       tokens: [Symbol, Number]
//!   - select_text:
//!       texts: [define]
//!       context: [List]
//!   - exclude_kinds:
//!       nodes: [Quote]
//!       delete_subtree: true
//!   - select_all
//! ```
//!
//! Kind names are the serde names of the language's kind enums. Contexts list
//! node kinds outermost first.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, FilterResult};
use crate::filter::{ContextPattern, KindSet, Rule};
use crate::syntax::Language;

/// One rule as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    rename_all = "snake_case",
    deny_unknown_fields,
    bound(deserialize = "N: Deserialize<'de>, T: Deserialize<'de>")
)]
pub enum RuleSpec<N, T> {
    SelectKinds {
        #[serde(default = "Vec::new")]
        nodes: Vec<N>,
        #[serde(default = "Vec::new")]
        tokens: Vec<T>,
        #[serde(default = "Vec::new")]
        context: Vec<N>,
    },
    SelectText {
        texts: Vec<String>,
        #[serde(default = "Vec::new")]
        context: Vec<N>,
    },
    SelectAll,
    ExcludeKinds {
        #[serde(default = "Vec::new")]
        nodes: Vec<N>,
        #[serde(default = "Vec::new")]
        tokens: Vec<T>,
        #[serde(default = "Vec::new")]
        context: Vec<N>,
        #[serde(default)]
        delete_subtree: bool,
    },
}

/// A whole rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    deny_unknown_fields,
    bound(deserialize = "N: Deserialize<'de>, T: Deserialize<'de>")
)]
pub struct FilterConfig<N, T> {
    pub rules: Vec<RuleSpec<N, T>>,
}

impl<N, T> Default for FilterConfig<N, T> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<N: DeserializeOwned, T: DeserializeOwned> FilterConfig<N, T> {
    /// Loads a rule set; `.json` files are read as JSON, anything else as YAML.
    pub fn from_path(path: &Path) -> FilterResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| FilterError::io(path, e))?;
        let origin = path.display().to_string();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text, &origin)
        } else {
            Self::from_yaml_str(&text, &origin)
        }
    }

    pub fn from_yaml_str(text: &str, origin: &str) -> FilterResult<Self> {
        serde_yaml::from_str(text).map_err(|e| FilterError::config(origin, e))
    }

    pub fn from_json_str(text: &str, origin: &str) -> FilterResult<Self> {
        serde_json::from_str(text).map_err(|e| FilterError::config(origin, e))
    }
}

impl<N: Copy, T: Copy> FilterConfig<N, T> {
    /// Builds engine rules for a language with these kind types.
    pub fn into_rules<L>(self) -> Vec<Rule<L>>
    where
        L: Language<NodeKind = N, TokenKind = T>,
    {
        self.rules.into_iter().map(|spec| spec.into_rule()).collect()
    }
}

impl<N: Copy, T: Copy> RuleSpec<N, T> {
    pub fn into_rule<L>(self) -> Rule<L>
    where
        L: Language<NodeKind = N, TokenKind = T>,
    {
        match self {
            RuleSpec::SelectKinds {
                nodes,
                tokens,
                context,
            } => {
                if nodes.is_empty() && tokens.is_empty() {
                    tracing::warn!("select_kinds rule lists no kinds and will never match");
                }
                Rule::select_kinds(KindSet::of(nodes, tokens)).within(ContextPattern::new(context))
            }
            RuleSpec::SelectText { texts, context } => {
                Rule::select_text(texts).within(ContextPattern::new(context))
            }
            RuleSpec::SelectAll => Rule::select_all(),
            RuleSpec::ExcludeKinds {
                nodes,
                tokens,
                context,
                delete_subtree,
            } => {
                if nodes.is_empty() && tokens.is_empty() {
                    tracing::warn!("exclude_kinds rule lists no kinds and will never match");
                }
                Rule::exclude_kinds(KindSet::of(nodes, tokens), delete_subtree)
                    .within(ContextPattern::new(context))
            }
        }
    }
}
