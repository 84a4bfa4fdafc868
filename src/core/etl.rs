use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting ETL process...");

        // Extract
        tracing::info!("📥 Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        tracing::debug!("Extract finished after {:?}", started.elapsed());

        // Transform
        tracing::info!("🔄 Transforming data...");
        let transformed_result = self.pipeline.transform(raw_data).await?;
        tracing::info!("Transformed {} records", transformed_result.record_count);

        // Load
        tracing::info!("💾 Loading data...");
        let output_path = self.pipeline.load(transformed_result).await?;
        tracing::info!(
            "📁 Output saved to: {} ({:?} total)",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
