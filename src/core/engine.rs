use crate::core::export::Exporter;
use crate::domain::model::{FormContext, ResultPayload};
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::cancel::CancellationToken;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub payload: ResultPayload,
    pub written: Vec<String>,
}

/// Runs analysis then export for one form submission.
pub struct ReportEngine<P: Pipeline, S: Storage> {
    pipeline: P,
    exporter: Exporter<S>,
}

impl<P: Pipeline, S: Storage> ReportEngine<P, S> {
    pub fn new(pipeline: P, exporter: Exporter<S>) -> Self {
        Self { pipeline, exporter }
    }

    pub async fn run(&self, form: &FormContext) -> Result<RunReport> {
        self.run_with_cancel(form, &CancellationToken::new()).await
    }

    pub async fn run_with_cancel(
        &self,
        form: &FormContext,
        cancel: &CancellationToken,
    ) -> Result<RunReport> {
        tracing::info!(
            "🚀 Analyzing '{}' trends for '{}'",
            form.domain,
            form.country
        );

        let payload = self.pipeline.execute(form, cancel).await?;
        tracing::info!(
            "🔄 {} trends ranked, {} projects generated",
            payload.metadata.filtered,
            payload.metadata.generated_count
        );

        tracing::info!("💾 Exporting {} format(s)", self.exporter.formats().len());
        let written = self.exporter.export(&payload).await?;

        Ok(RunReport { payload, written })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::TrendPipeline;
    use crate::domain::model::ExportFormat;
    use crate::utils::error::TrendError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                TrendError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct FailingPipeline {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Pipeline for FailingPipeline {
        async fn execute(
            &self,
            _form: &FormContext,
            _cancel: &CancellationToken,
        ) -> Result<ResultPayload> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TrendError::internal("catalog entry malformed"))
        }
    }

    #[tokio::test]
    async fn test_run_exports_requested_formats() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(storage.clone(), vec![ExportFormat::Markdown]);
        let engine = ReportEngine::new(TrendPipeline::builtin(), exporter);

        let report = engine
            .run(&FormContext::new("Finance", "Germany"))
            .await
            .unwrap();

        assert_eq!(report.written, vec!["project-specs.md"]);
        assert_eq!(report.payload.projects.len(), 1);
        let markdown = storage.read_file("project-specs.md").await.unwrap();
        assert!(String::from_utf8(markdown)
            .unwrap()
            .contains("Crypto Portfolio Management Tool"));
    }

    #[tokio::test]
    async fn test_pipeline_failure_skips_export() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(storage.clone(), vec![ExportFormat::Json]);
        let pipeline = FailingPipeline {
            calls: AtomicUsize::new(0),
        };
        let engine = ReportEngine::new(pipeline, exporter);

        let err = engine
            .run(&FormContext::new("Finance", "Germany"))
            .await
            .unwrap_err();

        assert!(matches!(err, TrendError::InternalError { .. }));
        assert_eq!(engine.pipeline.calls.load(Ordering::SeqCst), 1);
        assert!(storage.read_file("project-specs.json").await.is_err());
    }

    #[tokio::test]
    async fn test_cancelled_run_writes_nothing() {
        let storage = MockStorage::default();
        let exporter = Exporter::new(storage.clone(), vec![ExportFormat::Csv]);
        let engine = ReportEngine::new(TrendPipeline::builtin(), exporter);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = engine
            .run_with_cancel(&FormContext::new("Finance", "Germany"), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, TrendError::Cancelled));
        assert!(storage.files.lock().await.is_empty());
    }
}
