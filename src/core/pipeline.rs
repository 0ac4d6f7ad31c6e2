use crate::core::assembler::ResultAssembler;
use crate::core::catalog::TrendCatalog;
use crate::core::filter::rank_trends;
use crate::core::templates::{generate_projects, TemplateCatalog};
use crate::domain::model::{FormContext, GeneratedProject, ResultPayload, ScoredTrend};
use crate::domain::ports::Pipeline;
use crate::utils::cancel::CancellationToken;
use crate::utils::error::{Result, TrendError};
use std::sync::Arc;
use std::time::Duration;

/// Ranked trends for one request, plus how many catalog entries were considered.
#[derive(Debug, Clone)]
pub struct TrendAnalysis {
    pub total_found: usize,
    pub trends: Vec<ScoredTrend>,
}

/// Stateless analysis service. Catalogs are shared read-only; every call owns
/// the trends and projects it derives.
#[derive(Debug, Clone)]
pub struct TrendPipeline {
    catalog: Arc<TrendCatalog>,
    templates: Arc<TemplateCatalog>,
    simulated_delay: Duration,
}

impl TrendPipeline {
    pub fn new(catalog: Arc<TrendCatalog>, templates: Arc<TemplateCatalog>) -> Self {
        Self {
            catalog,
            templates,
            simulated_delay: Duration::ZERO,
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            Arc::new(TrendCatalog::builtin()),
            Arc::new(TemplateCatalog::builtin()),
        )
    }

    /// Emulated backend latency, awaited once per request before any stage runs.
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    pub fn catalog(&self) -> &TrendCatalog {
        &self.catalog
    }

    pub fn analyze_trends(&self, form: &FormContext) -> TrendAnalysis {
        let trends = self.catalog.lookup(&form.domain);
        tracing::debug!(
            "Catalog lookup for '{}' returned {} trends",
            form.domain,
            trends.len()
        );

        TrendAnalysis {
            total_found: trends.len(),
            trends: rank_trends(trends, form),
        }
    }

    pub fn generate_projects(
        &self,
        form: &FormContext,
        trends: &[ScoredTrend],
    ) -> Vec<GeneratedProject> {
        generate_projects(&self.templates, form, trends)
    }

    /// Runs every stage synchronously, without the simulated delay.
    pub fn run_blocking(&self, form: &FormContext) -> ResultPayload {
        let analysis = self.analyze_trends(form);
        let projects = self.generate_projects(form, &analysis.trends);
        tracing::info!(
            "📈 Ranked {} of {} trends, generated {} projects",
            analysis.trends.len(),
            analysis.total_found,
            projects.len()
        );
        ResultAssembler::new(analysis.total_found).assemble(analysis.trends, projects, form)
    }

    /// Always runs to completion.
    pub async fn run(&self, form: &FormContext) -> Result<ResultPayload> {
        self.run_with_cancel(form, &CancellationToken::new()).await
    }

    /// Cancellation is observed only before and during the simulated delay;
    /// once the stages start they finish.
    pub async fn run_with_cancel(
        &self,
        form: &FormContext,
        cancel: &CancellationToken,
    ) -> Result<ResultPayload> {
        if cancel.is_cancelled() {
            return Err(TrendError::Cancelled);
        }

        if !self.simulated_delay.is_zero() {
            tracing::debug!("Simulating {:?} of latency", self.simulated_delay);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!("🔶 Analysis for '{}' cancelled", form.domain);
                    return Err(TrendError::Cancelled);
                }
                _ = tokio::time::sleep(self.simulated_delay) => {}
            }
        }

        Ok(self.run_blocking(form))
    }
}

#[async_trait::async_trait]
impl Pipeline for TrendPipeline {
    async fn execute(
        &self,
        form: &FormContext,
        cancel: &CancellationToken,
    ) -> Result<ResultPayload> {
        self.run_with_cancel(form, cancel).await
    }
}
