pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{build_engine, cli::LocalStorage, toml_config::TomlConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{
    catalog::TrendCatalog,
    engine::{ReportEngine, RunReport},
    export::Exporter,
    pipeline::TrendPipeline,
    templates::TemplateCatalog,
};
pub use domain::model::{ExportFormat, FormContext, ResultPayload};
pub use utils::cancel::CancellationToken;
pub use utils::error::{Result, TrendError};
