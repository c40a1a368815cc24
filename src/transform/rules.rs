use std::collections::HashSet;

use anyhow::Result;

use crate::config::Config;
use crate::transform::rebrand::RebrandFilter;

/// Resolved settings the transform runs with.
///
/// Built once per batch from [`Config`] and shared read-only by every file.
#[derive(Debug, Clone)]
pub struct TransformRules {
    pub text_components: HashSet<String>,
    pub translate_function: String,
    pub template_component: String,
    pub template_key_prop: String,
    pub import_source: String,
    pub translatable_properties: HashSet<String>,
    pub debug_prefixes: Vec<String>,
    pub max_branch_count: usize,
    pub rebrand: RebrandFilter,
}

impl TransformRules {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            text_components: config.text_components.iter().cloned().collect(),
            translate_function: config.translate_function.clone(),
            template_component: config.template_component.clone(),
            template_key_prop: config.template_key_prop.clone(),
            import_source: config.import_source.clone(),
            translatable_properties: config.translatable_properties.iter().cloned().collect(),
            debug_prefixes: config.debug_prefixes.clone(),
            max_branch_count: config.max_branch_count,
            rebrand: RebrandFilter::new(&config.rebrand)?,
        })
    }

    pub fn is_text_component(&self, name: &str) -> bool {
        self.text_components.contains(name)
    }

    pub fn is_debug_text(&self, text: &str) -> bool {
        let text = text.trim_start();
        self.debug_prefixes
            .iter()
            .any(|prefix| text.starts_with(prefix.as_str()))
    }
}

impl Default for TransformRules {
    fn default() -> Self {
        let config = Config::default();
        Self {
            text_components: config.text_components.into_iter().collect(),
            translate_function: config.translate_function,
            template_component: config.template_component,
            template_key_prop: config.template_key_prop,
            import_source: config.import_source,
            translatable_properties: config.translatable_properties.into_iter().collect(),
            debug_prefixes: config.debug_prefixes,
            max_branch_count: config.max_branch_count,
            rebrand: RebrandFilter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RebrandRule;

    #[test]
    fn test_from_config() {
        let config = Config {
            text_components: vec!["Label".to_string()],
            rebrand: vec![RebrandRule {
                from: "Old".to_string(),
                to: "New".to_string(),
            }],
            ..Default::default()
        };
        let rules = TransformRules::from_config(&config).unwrap();
        assert!(rules.is_text_component("Label"));
        assert!(!rules.is_text_component("Text"));
        assert_eq!(rules.rebrand.apply("Old name"), "New name");
    }

    #[test]
    fn test_is_debug_text() {
        let rules = TransformRules::default();
        assert!(rules.is_debug_text("DEBUG: internal"));
        assert!(rules.is_debug_text("  DEBUG mode"));
        assert!(!rules.is_debug_text("Debugging tips"));
        assert!(!rules.is_debug_text("Open settings"));
    }
}
