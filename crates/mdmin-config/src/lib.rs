//! Configuration management for mdmin.
//!
//! Parses `mdmin.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [menu]
//! level = "h2"      # "none" disables the menu
//! strict = false    # fail on tokens the rewriter does not recognize
//!
//! [markdown]
//! gfm = true        # tables, strikethrough, task lists, footnotes
//!
//! [output]
//! template = "page.html"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `menu.level` and `output.template` support `${VAR}` (errors if unset) and
//! `${VAR:-default}`. Values are expanded before the level is parsed and
//! before the template path is resolved, so a variable may hold either.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use mdmin_renderer::{ConvertOptions, MarkdownOptions, MenuMode, TokenPolicy};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override menu level.
    pub level: Option<MenuMode>,
    /// Override strict token handling.
    pub strict: Option<bool>,
    /// Override GitHub-flavored markdown extensions.
    pub gfm: Option<bool>,
    /// Override page template path.
    pub template: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdmin.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Menu configuration as written in TOML.
    menu: MenuConfigRaw,
    /// Markdown configuration.
    pub markdown: MarkdownConfig,
    /// Output configuration as written in TOML.
    output: OutputConfigRaw,

    /// Resolved menu mode (set after loading).
    #[serde(skip)]
    pub mode: MenuMode,
    /// Whether unrecognized tokens abort the conversion.
    #[serde(skip)]
    pub strict: bool,
    /// Resolved page template path (set after loading).
    #[serde(skip)]
    pub template: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MenuConfigRaw {
    level: Option<String>,
    strict: Option<bool>,
}

/// Markdown configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub-flavored markdown extensions.
    pub gfm: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputConfigRaw {
    template: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.template`").
        field: String,
        /// Error message (e.g., "${`TEMPLATE_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdmin.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Options for [`mdmin_renderer::Converter`].
    #[must_use]
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            mode: self.mode,
            markdown: MarkdownOptions {
                gfm: self.markdown.gfm,
            },
            policy: if self.strict {
                TokenPolicy::Strict
            } else {
                TokenPolicy::Lenient
            },
        }
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(level) = settings.level {
            self.mode = level;
        }
        if let Some(strict) = settings.strict {
            self.strict = strict;
        }
        if let Some(gfm) = settings.gfm {
            self.markdown.gfm = gfm;
        }
        if let Some(template) = &settings.template {
            self.template = Some(template.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Expand, parse and validate the raw sections into the resolved fields.
    ///
    /// The template path is resolved against `config_dir`.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        self.mode = match self.menu.level.as_deref() {
            Some(raw) => expand_field("menu.level", raw)?
                .parse()
                .map_err(|e| ConfigError::Validation(format!("menu.level: {e}")))?,
            None => MenuMode::default(),
        };
        self.strict = self.menu.strict.unwrap_or(false);

        self.template = match self.output.template.as_deref() {
            Some(raw) => {
                let template = expand_field("output.template", raw)?;
                if template.is_empty() {
                    return Err(ConfigError::Validation(
                        "output.template cannot be empty".to_owned(),
                    ));
                }
                Some(config_dir.join(&*template))
            }
            None => None,
        };

        Ok(())
    }
}

/// Expand `${VAR}` and `${VAR:-default}` in one raw config value.
///
/// Values without `${` are borrowed unchanged, so a bare `$` in a path stays
/// literal.
fn expand_field<'a>(field: &str, raw: &'a str) -> Result<Cow<'a, str>, ConfigError> {
    if !raw.contains("${") {
        return Ok(Cow::Borrowed(raw));
    }
    shellexpand::env_with_context(raw, |name| std::env::var(name).map(Some)).map_err(|e| {
        ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}}: {}", e.var_name, e.cause),
        }
    })
}
