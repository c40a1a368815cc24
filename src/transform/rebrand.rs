//! Product-name rebranding applied to every translation key.
//!
//! Each rule replaces whole-word occurrences of `from` with `to`. Word
//! boundaries are only enforced on edges that are word characters, so names
//! like `@acme/cli` still match.

use anyhow::{Context, Result};
use regex::{NoExpand, Regex};

use crate::config::RebrandRule;

#[derive(Debug, Clone, Default)]
pub struct RebrandFilter {
    rules: Vec<(Regex, String)>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl RebrandFilter {
    pub fn new(rules: &[RebrandRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let mut pattern = regex::escape(&rule.from);
                if rule.from.starts_with(is_word_char) {
                    pattern.insert_str(0, r"\b");
                }
                if rule.from.ends_with(is_word_char) {
                    pattern.push_str(r"\b");
                }
                let regex = Regex::new(&pattern)
                    .with_context(|| format!("Invalid rebrand rule: \"{}\"", rule.from))?;
                Ok((regex, rule.to.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (regex, to)| {
                regex.replace_all(&acc, NoExpand(to)).into_owned()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(rules: &[(&str, &str)]) -> RebrandFilter {
        let rules: Vec<RebrandRule> = rules
            .iter()
            .map(|(from, to)| RebrandRule {
                from: from.to_string(),
                to: to.to_string(),
            })
            .collect();
        RebrandFilter::new(&rules).unwrap()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let filter = RebrandFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply("Welcome to Acme"), "Welcome to Acme");
    }

    #[test]
    fn test_whole_word_replacement() {
        let filter = filter(&[("Acme", "Globex")]);
        assert_eq!(filter.apply("Welcome to Acme"), "Welcome to Globex");
        assert_eq!(filter.apply("AcmeCorp stays"), "AcmeCorp stays");
    }

    #[test]
    fn test_symbol_edges_and_literal_replacement() {
        let filter = filter(&[("@acme/cli", "$pkg")]);
        assert_eq!(filter.apply("Run @acme/cli now"), "Run $pkg now");
    }

    #[test]
    fn test_rules_apply_in_order() {
        let filter = filter(&[("Acme", "Globex"), ("Globex Cloud", "Initech")]);
        assert_eq!(filter.apply("Acme Cloud"), "Initech");
    }
}
