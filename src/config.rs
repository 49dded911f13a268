//! Configuration for assessment runs
//!
//! Reads configuration from:
//! - `.assessrc.yaml` / `.assessrc.yml` / `.assessrc.json` (project-level)
//! - the same names in the home directory (user-level)

use crate::registry::{Preset, Registry};
use crate::result::ValidityPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Assess pages, and assessments within a page, in parallel (default on)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,

    /// Number of parallel jobs (0 = auto-detect)
    pub jobs: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: None,
            jobs: 0,
        }
    }
}

impl EngineConfig {
    pub fn parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

/// Assessor settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessorConfig {
    /// Built-in assessment set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Which results count as valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validity: Option<ValidityPolicy>,

    /// Locale for pages that do not declare one
    pub locale: Option<String>,
}

impl AssessorConfig {
    pub fn preset(&self) -> Preset {
        self.preset.unwrap_or_default()
    }

    pub fn validity(&self) -> ValidityPolicy {
        self.validity.unwrap_or_default()
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Color mode
    pub color: ColorMode,

    /// Also show results that are not valid
    pub verbose: bool,

    /// Show summary statistics
    pub statistics: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: ColorMode::Auto,
            verbose: false,
            statistics: true,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Compact,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "compact" => Ok(OutputFormat::Compact),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Color mode options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Assessment selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Disabled assessments
    pub disabled: Vec<String>,

    /// Enabled assessments (empty = all)
    pub enabled: Vec<String>,

    /// Per-page skips (glob pattern -> assessment ids, or "all")
    pub per_page: HashMap<String, Vec<String>>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extend from other configuration files or presets
    pub extends: Vec<String>,

    pub engine: EngineConfig,

    pub assessor: AssessorConfig,

    pub output: OutputConfig,

    pub rules: RulesConfig,

    /// Translation catalog for feedback text
    pub messages: Option<PathBuf>,
}

/// Assessments that apply to every document
const ALWAYS_ON: &[&str] = &[
    "keyphraseLength",
    "metaDescriptionLength",
    "textLength",
    "titleWidth",
];

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a preset configuration by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::default()),
            "cornerstone" => Some(Self::preset_cornerstone()),
            "minimal" => Some(Self::preset_minimal()),
            _ => None,
        }
    }

    /// Cornerstone preset - stricter thresholds for central content
    fn preset_cornerstone() -> Self {
        Self {
            assessor: AssessorConfig {
                preset: Some(Preset::Cornerstone),
                ..AssessorConfig::default()
            },
            ..Self::default()
        }
    }

    /// Minimal preset - only the assessments that need no keyphrase
    fn preset_minimal() -> Self {
        Self {
            rules: RulesConfig {
                enabled: ALWAYS_ON.iter().map(|s| s.to_string()).collect(),
                ..RulesConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_depth(path, 0)
    }

    /// Load with recursion depth limit (to prevent infinite loops)
    fn load_with_depth(path: &Path, depth: usize) -> Result<Self, ConfigError> {
        const MAX_DEPTH: usize = 10;
        if depth >= MAX_DEPTH {
            return Err(ConfigError::Invalid(
                "Maximum config inheritance depth exceeded".to_string(),
            ));
        }

        let content = std::fs::read_to_string(path)?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let mut config: Self = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "Unknown config file format: {}",
                    ext
                )))
            }
        };

        let base_dir = path.parent().unwrap_or(Path::new("."));

        // Catalog paths are relative to the file that names them
        if let Some(messages) = &config.messages {
            if messages.is_relative() {
                config.messages = Some(base_dir.join(messages));
            }
        }

        if !config.extends.is_empty() {
            let mut base_config = Self::default();

            for extend in &config.extends.clone() {
                let extended = if let Some(preset) = Self::preset(extend) {
                    preset
                } else {
                    let extend_path = if Path::new(extend).is_absolute() {
                        PathBuf::from(extend)
                    } else {
                        base_dir.join(extend)
                    };
                    Self::load_with_depth(&extend_path, depth + 1)?
                };
                base_config.merge(extended);
            }

            // Merge current config on top of base
            base_config.merge(config);
            config = base_config;
        }

        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Self) {
        // Engine settings
        if other.engine.jobs != 0 {
            self.engine.jobs = other.engine.jobs;
        }
        if other.engine.parallel.is_some() {
            self.engine.parallel = other.engine.parallel;
        }

        // Assessor settings
        if other.assessor.preset.is_some() {
            self.assessor.preset = other.assessor.preset;
        }
        if other.assessor.validity.is_some() {
            self.assessor.validity = other.assessor.validity;
        }
        if other.assessor.locale.is_some() {
            self.assessor.locale = other.assessor.locale;
        }

        // Output settings
        if other.output.format != OutputFormat::Text {
            self.output.format = other.output.format;
        }
        if other.output.verbose {
            self.output.verbose = true;
        }
        if other.output.color != ColorMode::Auto {
            self.output.color = other.output.color;
        }
        if !other.output.statistics {
            self.output.statistics = false;
        }

        // Rules
        self.rules.disabled.extend(other.rules.disabled);
        if !other.rules.enabled.is_empty() {
            self.rules.enabled = other.rules.enabled;
        }
        for (pattern, rules) in other.rules.per_page {
            self.rules.per_page.entry(pattern).or_default().extend(rules);
        }

        if other.messages.is_some() {
            self.messages = other.messages;
        }
    }

    /// Load configuration from default locations
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_names = [".assessrc.yaml", ".assessrc.yml", ".assessrc.json"];

        // Check current directory
        for name in &config_names {
            let path = PathBuf::from(name);
            if path.exists() {
                return Self::load(&path);
            }
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            for name in &config_names {
                let path = home.join(name);
                if path.exists() {
                    return Self::load(&path);
                }
            }
        }

        Ok(Self::default())
    }

    /// Merge CLI arguments into configuration
    pub fn merge_cli(
        &mut self,
        format: Option<OutputFormat>,
        verbose: Option<bool>,
        jobs: Option<usize>,
        disabled_rules: Option<Vec<String>>,
        enabled_rules: Option<Vec<String>>,
        preset: Option<Preset>,
    ) {
        if let Some(f) = format {
            self.output.format = f;
        }
        if let Some(v) = verbose {
            self.output.verbose = v;
        }
        if let Some(j) = jobs {
            self.engine.jobs = j;
        }
        if let Some(disabled) = disabled_rules {
            self.rules.disabled.extend(disabled);
        }
        if let Some(enabled) = enabled_rules {
            self.rules.enabled = enabled;
        }
        if let Some(p) = preset {
            self.assessor.preset = Some(p);
        }
    }

    /// Check if an assessment is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        if self.rules.disabled.iter().any(|r| r == rule_id) {
            return false;
        }

        // If enabled list is not empty, rule must be in it
        if !self.rules.enabled.is_empty() {
            return self.rules.enabled.iter().any(|r| r == rule_id);
        }

        true
    }

    /// Check if an assessment should be skipped for a page file
    pub fn should_skip_rule_for_page(&self, rule_id: &str, page_path: &Path) -> bool {
        let page_str = page_path.to_string_lossy();

        for (pattern, rules) in &self.rules.per_page {
            if let Ok(glob) = globset::Glob::new(pattern) {
                let matcher = glob.compile_matcher();
                if matcher.is_match(page_str.as_ref())
                    && rules.iter().any(|r| r == "all" || r == rule_id)
                {
                    return true;
                }
            }
        }

        false
    }

    /// Ids in `rules.enabled`/`rules.disabled` that no registered assessment has
    pub fn unknown_rule_ids(&self, registry: &Registry) -> Vec<String> {
        self.rules
            .enabled
            .iter()
            .chain(&self.rules.disabled)
            .filter(|id| !registry.contains(id))
            .cloned()
            .collect()
    }

    /// The preset registry restricted to enabled assessments
    pub fn registry(&self) -> Registry {
        let mut registry = self.assessor.preset().registry();
        registry.retain(|id| self.is_rule_enabled(id));
        registry
    }

    /// [`Config::registry`] further restricted by per-page skips
    pub fn registry_for(&self, page_path: &Path) -> Registry {
        let mut registry = self.registry();
        registry.retain(|id| !self.should_skip_rule_for_page(id, page_path));
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert!(config.engine.parallel());
        assert_eq!(config.engine.jobs, 0);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.assessor.preset(), Preset::Seo);
        assert_eq!(config.assessor.validity(), ValidityPolicy::NonZeroScore);
        assert_eq!(config.registry().len(), 15);
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("compact".parse::<OutputFormat>().unwrap(), OutputFormat::Compact);
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_config_merge_cli() {
        let mut config = Config::new();
        config.merge_cli(
            Some(OutputFormat::Json),
            Some(true),
            Some(4),
            Some(vec!["textLength".to_string()]),
            None,
            Some(Preset::Cornerstone),
        );

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.verbose);
        assert_eq!(config.engine.jobs, 4);
        assert!(!config.is_rule_enabled("textLength"));
        assert_eq!(config.registry().name(), "cornerstone");
    }

    #[test]
    fn test_rule_enabled() {
        let mut config = Config::new();
        assert!(config.is_rule_enabled("titleWidth"));

        config.rules.disabled.push("titleWidth".to_string());
        assert!(!config.is_rule_enabled("titleWidth"));
        assert!(config.is_rule_enabled("textLength"));

        config.rules.enabled = vec!["urlKeyword".to_string()];
        assert!(!config.is_rule_enabled("textLength"));
        assert!(config.is_rule_enabled("urlKeyword"));
        assert_eq!(config.registry().ids(), vec!["urlKeyword"]);
    }

    #[test]
    fn test_registry_keeps_order() {
        let mut config = Config::new();
        config.rules.enabled = vec!["titleWidth".to_string(), "keyphraseLength".to_string()];
        assert_eq!(config.registry().ids(), vec!["keyphraseLength", "titleWidth"]);
    }

    #[test]
    fn test_per_page_skips() {
        let mut config = Config::new();
        config
            .rules
            .per_page
            .insert("drafts/**".to_string(), vec!["textLength".to_string()]);
        config
            .rules
            .per_page
            .insert("**/legal.md".to_string(), vec!["all".to_string()]);

        assert!(config.should_skip_rule_for_page("textLength", Path::new("drafts/a.md")));
        assert!(!config.should_skip_rule_for_page("titleWidth", Path::new("drafts/a.md")));
        assert!(!config.should_skip_rule_for_page("textLength", Path::new("posts/a.md")));
        assert!(config.registry_for(Path::new("site/legal.md")).is_empty());
        assert_eq!(config.registry_for(Path::new("drafts/a.md")).len(), 14);
    }

    #[test]
    fn test_unknown_rule_ids() {
        let mut config = Config::new();
        config.rules.disabled = vec!["textLength".to_string(), "readability".to_string()];
        assert_eq!(config.unknown_rule_ids(&Registry::seo()), vec!["readability"]);
    }

    #[test]
    fn test_yaml_deserialize() {
        let yaml = r#"
engine:
  parallel: false
  jobs: 4
assessor:
  preset: cornerstone
  validity: has-score
  locale: nl_NL
output:
  format: json
  verbose: true
rules:
  disabled:
    - textImages
    - urlKeyword
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.engine.parallel());
        assert_eq!(config.engine.jobs, 4);
        assert_eq!(config.assessor.preset(), Preset::Cornerstone);
        assert_eq!(config.assessor.validity(), ValidityPolicy::HasScore);
        assert_eq!(config.assessor.locale.as_deref(), Some("nl_NL"));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.verbose);
        assert_eq!(config.rules.disabled.len(), 2);
    }

    #[test]
    fn test_load_with_extends() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yaml");
        std::fs::write(&base, "rules:\n  disabled: [textImages]\n").unwrap();

        let path = dir.path().join(".assessrc.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "extends: [cornerstone, base.yaml]\nrules:\n  disabled: [urlKeyword]\nmessages: nl.yaml"
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.assessor.preset(), Preset::Cornerstone);
        assert_eq!(config.rules.disabled, vec!["textImages", "urlKeyword"]);
        assert_eq!(config.messages, Some(dir.path().join("nl.yaml")));
    }

    #[test]
    fn test_extending_config_can_restore_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.yaml"),
            "engine:\n  parallel: false\nassessor:\n  preset: cornerstone\n  validity: has-score\n",
        )
        .unwrap();

        let child = dir.path().join("child.yaml");
        std::fs::write(
            &child,
            "extends: [base.yaml]\nassessor:\n  preset: seo\n  validity: non-zero-score\n",
        )
        .unwrap();

        let config = Config::load(&child).unwrap();
        assert_eq!(config.assessor.preset(), Preset::Seo);
        assert_eq!(config.assessor.validity(), ValidityPolicy::NonZeroScore);
        // Not set by the child, so the base value stays
        assert!(!config.engine.parallel());

        let silent = dir.path().join("silent.yaml");
        std::fs::write(&silent, "extends: [base.yaml]\n").unwrap();
        let config = Config::load(&silent).unwrap();
        assert_eq!(config.assessor.preset(), Preset::Cornerstone);
        assert_eq!(config.assessor.validity(), ValidityPolicy::HasScore);
    }

    #[test]
    fn test_minimal_preset() {
        let config = Config::preset("minimal").unwrap();
        assert_eq!(
            config.registry().ids(),
            vec!["keyphraseLength", "metaDescriptionLength", "textLength", "titleWidth"]
        );
        assert!(Config::preset("strict").is_none());
    }

    #[test]
    fn test_self_extending_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.json");
        std::fs::write(&path, r#"{"extends": ["loop.json"]}"#).unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Invalid(_))));
    }
}
