use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".i18n-transform.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

/// One whole-word replacement applied to every translation key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RebrandRule {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Element names whose children are user-facing text.
    #[serde(default = "default_text_components")]
    pub text_components: Vec<String>,
    #[serde(default = "default_translate_function")]
    pub translate_function: String,
    #[serde(default = "default_template_component")]
    pub template_component: String,
    /// Attribute carrying the translation key on the template component.
    #[serde(default = "default_template_key_prop")]
    pub template_key_prop: String,
    #[serde(default = "default_import_source")]
    pub import_source: String,
    /// Object field names whose string values are translated.
    #[serde(default = "default_translatable_properties")]
    pub translatable_properties: Vec<String>,
    #[serde(default = "default_debug_prefixes")]
    pub debug_prefixes: Vec<String>,
    /// Upper bound on branch combinations per node.
    #[serde(default = "default_max_branch_count")]
    pub max_branch_count: usize,
    #[serde(default)]
    pub rebrand: Vec<RebrandRule>,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_text_components() -> Vec<String> {
    vec!["Text".to_string()]
}

fn default_translate_function() -> String {
    "t".to_string()
}

fn default_template_component() -> String {
    "I18nText".to_string()
}

fn default_template_key_prop() -> String {
    "i18nKey".to_string()
}

fn default_import_source() -> String {
    "@/i18n".to_string()
}

fn default_translatable_properties() -> Vec<String> {
    ["title", "label", "description", "message", "placeholder", "text"]
        .map(String::from)
        .to_vec()
}

fn default_debug_prefixes() -> Vec<String> {
    vec!["DEBUG".to_string()]
}

fn default_max_branch_count() -> usize {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignores: Vec::new(),
            includes: default_includes(),
            source_root: default_source_root(),
            ignore_test_files: default_ignore_test_files(),
            text_components: default_text_components(),
            translate_function: default_translate_function(),
            template_component: default_template_component(),
            template_key_prop: default_template_key_prop(),
            import_source: default_import_source(),
            translatable_properties: default_translatable_properties(),
            debug_prefixes: default_debug_prefixes(),
            max_branch_count: default_max_branch_count(),
            rebrand: Vec::new(),
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns, names that are not
    /// JavaScript identifiers, or a zero branch limit.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        let identifiers = [
            ("translateFunction", &self.translate_function),
            ("templateComponent", &self.template_component),
        ];
        for (field, value) in identifiers {
            if !is_identifier(value) {
                bail!("Invalid identifier in '{}': \"{}\"", field, value);
            }
        }
        for name in &self.text_components {
            if !is_identifier(name) {
                bail!("Invalid identifier in 'textComponents': \"{}\"", name);
            }
        }

        if self.max_branch_count == 0 {
            bail!("'maxBranchCount' must be at least 1");
        }

        for rule in &self.rebrand {
            if rule.from.is_empty() {
                bail!("Empty 'from' in 'rebrand' rule (to: \"{}\")", rule.to);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
