use crate::app::error::ConfigError;
use regex::Regex;

/// An ordered set of compiled name patterns. Matching is unanchored search.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<Regex>,
}

impl PatternMatcher {
    pub fn new(sources: &[String]) -> Result<Self, ConfigError> {
        let patterns = sources
            .iter()
            .map(|src| {
                Regex::new(src).map_err(|e| ConfigError::InvalidPattern {
                    pattern: src.clone(),
                    source: e,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True iff at least one pattern is found somewhere in `name`.
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(name))
    }
}
