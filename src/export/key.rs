use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context_processor::ContextEntry;

// @module: Grouping key policies

// @const: Leading document/page segment of a location, e.g. "64ra" in "64ra23"
static LOCATION_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+[a-z]+").unwrap()
});

/// Grouping key policy for sublist aggregation.
///
/// Every policy is a total function over context entries: it always yields a
/// key, so aggregation cannot fail on key extraction. The aggregator itself
/// is generic over any `Fn(&ContextEntry) -> String`; these are the policies
/// selectable from configuration and the command line.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupingPolicy {
    // @policy: Group by keyword
    #[default]
    Keyword,
    // @policy: Group by lemma name, keyword when unannotated
    Lemma,
    // @policy: Group by first letter of the keyword
    Initial,
    // @policy: Group by document segment of the location
    Location,
}

impl GroupingPolicy {
    /// Derives the grouping key for a context entry.
    pub fn key_of(&self, context: &ContextEntry) -> String {
        match self {
            Self::Keyword => context.keyword.clone(),
            Self::Lemma => context
                .lemma
                .as_ref()
                .map(|lemma| lemma.name.clone())
                .unwrap_or_else(|| context.keyword.clone()),
            Self::Initial => context
                .keyword
                .chars()
                .next()
                .map(|c| c.to_lowercase().collect())
                .unwrap_or_default(),
            Self::Location => LOCATION_PREFIX_REGEX
                .find(&context.location)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| context.location.clone()),
        }
    }

    // @returns: Lowercase policy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Keyword => "keyword".to_string(),
            Self::Lemma => "lemma".to_string(),
            Self::Initial => "initial".to_string(),
            Self::Location => "location".to_string(),
        }
    }
}

// Implement Display trait for GroupingPolicy
impl std::fmt::Display for GroupingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for GroupingPolicy
impl std::str::FromStr for GroupingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "lemma" => Ok(Self::Lemma),
            "initial" => Ok(Self::Initial),
            "location" => Ok(Self::Location),
            _ => Err(anyhow!("Invalid grouping policy: {}", s)),
        }
    }
}
