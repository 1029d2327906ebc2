use crate::core::catalog::DEFAULT_RECORD_EXTENSION;
use crate::core::palette::ColorTable;
use crate::core::ClosetSettings;
use crate::domain::model::{FORMALITIES, GENDERS, LOCATIONS};
use crate::utils::error::{FitError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FitcheckConfig {
    #[serde(default)]
    pub closet: ClosetConfig,
    pub defaults: Option<DefaultsConfig>,
    pub recommend: Option<RecommendConfig>,
    pub logging: Option<LoggingConfig>,
    pub colors: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosetConfig {
    #[serde(default = "default_closet_path")]
    pub path: String,
    #[serde(default = "default_record_extension")]
    pub record_extension: String,
}

impl Default for ClosetConfig {
    fn default() -> Self {
        Self {
            path: default_closet_path(),
            record_extension: default_record_extension(),
        }
    }
}

fn default_closet_path() -> String {
    "./Closet".to_string()
}

fn default_record_extension() -> String {
    DEFAULT_RECORD_EXTENSION.to_string()
}

/// Request values used when the command line leaves them out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub location: Option<String>,
    pub formality: Option<String>,
    pub gender: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

impl FitcheckConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| FitError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLOSET_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn color_table(&self) -> ColorTable {
        match &self.colors {
            Some(overrides) => ColorTable::builtin().with_overrides(overrides),
            None => ColorTable::builtin(),
        }
    }

    pub fn defaults(&self) -> DefaultsConfig {
        self.defaults.clone().unwrap_or_default()
    }

    pub fn seed(&self) -> Option<u64> {
        self.recommend.as_ref().and_then(|r| r.seed)
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .and_then(LogFormat::parse)
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("closet.path", &self.closet.path)?;
        validate_non_empty_string(
            "closet.record_extension",
            self.closet.record_extension.trim_start_matches('.'),
        )?;

        if let Some(defaults) = &self.defaults {
            if let Some(location) = &defaults.location {
                validate_one_of("defaults.location", location, &LOCATIONS)?;
            }
            if let Some(formality) = &defaults.formality {
                validate_one_of("defaults.formality", formality, &FORMALITIES)?;
            }
            if let Some(gender) = &defaults.gender {
                validate_one_of("defaults.gender", gender, &GENDERS)?;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(format) = &logging.format {
                validate_one_of("logging.format", format, &["compact", "json"])?;
            }
        }

        if let Some(colors) = &self.colors {
            for base in colors.keys() {
                validate_non_empty_string("colors", base)?;
            }
        }

        Ok(())
    }
}

impl ClosetSettings for FitcheckConfig {
    fn closet_path(&self) -> &str {
        &self.closet.path
    }

    fn record_extension(&self) -> &str {
        &self.closet.record_extension
    }
}

impl Validate for FitcheckConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
