use crate::domain::model::{FragmentKind, MenuFragment, TransformResult};
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

#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}

/// 將樣式片段分類為標題、內文或忽略
pub trait FragmentClassifier: Send + Sync {
    fn classify(&self, fragment: &MenuFragment) -> FragmentKind;
}
