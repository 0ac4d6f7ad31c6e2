pub mod assembler;
pub mod catalog;
pub mod engine;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod scoring;
pub mod templates;

pub use crate::domain::model::{FormContext, ResultPayload, ScoredTrend, TrendRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
