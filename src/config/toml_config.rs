use crate::domain::model::{ExportFormat, FormContext};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, TrendError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_BUNDLE_FILENAME: &str = "project-specs.zip";
pub const MAX_SIMULATED_DELAY_MS: u64 = 60_000;

/// File-based run configuration.
///
/// ```toml
/// [form]
/// domain = "Technology"
/// country = "Japan"
/// age_range = "25-34"
///
/// [pipeline]
/// simulated_delay_ms = 1500
///
/// [export]
/// output_path = "${REPORT_DIR}"
/// formats = ["json", "md"]
/// bundle = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub form: FormSection,
    pub pipeline: PipelineSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSection {
    pub domain: String,
    pub country: String,
    pub age_range: Option<String>,
    pub income_level: Option<String>,
    pub interests: Option<String>,
    pub complexity: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    pub simulated_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub output_path: String,
    pub formats: Vec<ExportFormat>,
    pub bundle: bool,
    pub bundle_filename: Option<String>,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            formats: vec![ExportFormat::Json],
            bundle: false,
            bundle_filename: None,
        }
    }
}

impl From<FormSection> for FormContext {
    fn from(section: FormSection) -> Self {
        Self {
            domain: section.domain,
            country: section.country,
            age_range: section.age_range,
            income_level: section.income_level,
            interests: section.interests,
            complexity: section.complexity,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// `${VAR}` references are replaced from the environment before parsing.
    /// Unset variables are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrendError::internal(e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_formats("export.formats", &self.export.formats)?;
        if let Some(filename) = &self.export.bundle_filename {
            validation::validate_file_name("export.bundle_filename", filename)?;
        }
        validation::validate_range(
            "pipeline.simulated_delay_ms",
            self.pipeline.simulated_delay_ms,
            0,
            MAX_SIMULATED_DELAY_MS,
        )?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn form(&self) -> FormContext {
        self.form.clone().into()
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn formats(&self) -> &[ExportFormat] {
        &self.export.formats
    }

    fn bundle_filename(&self) -> Option<&str> {
        if !self.export.bundle {
            return None;
        }
        Some(
            self.export
                .bundle_filename
                .as_deref()
                .unwrap_or(DEFAULT_BUNDLE_FILENAME),
        )
    }

    fn simulated_delay_ms(&self) -> u64 {
        self.pipeline.simulated_delay_ms
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
