pub mod cli;
pub mod toml_config;

use crate::core::engine::ReportEngine;
use crate::core::export::Exporter;
use crate::core::pipeline::TrendPipeline;
use crate::domain::ports::ConfigProvider;
use cli::LocalStorage;
use std::time::Duration;

#[cfg(feature = "cli")]
use crate::domain::model::ExportFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

/// Wires the builtin catalogs and local storage according to `config`.
pub fn build_engine<C: ConfigProvider>(config: &C) -> ReportEngine<TrendPipeline, LocalStorage> {
    let pipeline = TrendPipeline::builtin()
        .with_simulated_delay(Duration::from_millis(config.simulated_delay_ms()));

    let storage = LocalStorage::new(config.output_path());
    let mut exporter = Exporter::new(storage, config.formats().to_vec());
    if let Some(filename) = config.bundle_filename() {
        exporter = exporter.with_bundle(filename);
    }

    ReportEngine::new(pipeline, exporter)
}

/// Command-line flags. Every value given here overrides the TOML file.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "trendspec")]
#[command(about = "Rank market trends for a domain and generate project specifications")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub domain: Option<String>,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long, help = "Age bracket such as 25-34")]
    pub age_range: Option<String>,

    #[arg(long, help = "low, middle or high")]
    pub income_level: Option<String>,

    #[arg(long, help = "Comma-separated interests")]
    pub interests: Option<String>,

    #[arg(long, help = "simple, medium or complex")]
    pub complexity: Option<String>,

    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long, value_enum, value_delimiter = ',')]
    pub formats: Vec<ExportFormat>,

    #[arg(long, help = "Pack all formats into one ZIP archive")]
    pub bundle: bool,

    #[arg(long)]
    pub bundle_filename: Option<String>,

    #[arg(long, help = "Simulated backend latency in milliseconds")]
    pub delay_ms: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Print ranked trends without writing files")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads `--config` when given, then applies the flags on top.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut TomlConfig) {
        let form = &mut config.form;
        if let Some(domain) = &self.domain {
            form.domain = domain.clone();
        }
        if let Some(country) = &self.country {
            form.country = country.clone();
        }
        if self.age_range.is_some() {
            form.age_range = self.age_range.clone();
        }
        if self.income_level.is_some() {
            form.income_level = self.income_level.clone();
        }
        if self.interests.is_some() {
            form.interests = self.interests.clone();
        }
        if self.complexity.is_some() {
            form.complexity = self.complexity.clone();
        }

        if let Some(output_path) = &self.output_path {
            config.export.output_path = output_path.clone();
        }
        if !self.formats.is_empty() {
            config.export.formats = self.formats.clone();
        }
        if self.bundle {
            config.export.bundle = true;
        }
        if self.bundle_filename.is_some() {
            config.export.bundle = true;
            config.export.bundle_filename = self.bundle_filename.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.pipeline.simulated_delay_ms = delay_ms;
        }
    }
}
