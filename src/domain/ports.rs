use crate::domain::model::{ExportFormat, FormContext, ResultPayload};
use crate::utils::cancel::CancellationToken;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn form(&self) -> FormContext;
    fn output_path(&self) -> &str;
    fn formats(&self) -> &[ExportFormat];
    fn bundle_filename(&self) -> Option<&str>;
    fn simulated_delay_ms(&self) -> u64;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn execute(
        &self,
        form: &FormContext,
        cancel: &CancellationToken,
    ) -> Result<ResultPayload>;
}
