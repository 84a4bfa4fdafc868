pub mod catalog_pipeline;
pub mod menu_pipeline;

pub use catalog_pipeline::CatalogPipeline;
pub use menu_pipeline::MenuPipeline;

use crate::core::{OutputFile, Storage};
use crate::utils::error::{Result, ScrapeError};
use std::path::Path;

/// 寫出所有輸出檔，回傳第一個（主要）檔案的路徑
pub(crate) async fn write_outputs<S: Storage>(
    storage: &S,
    output_path: &str,
    outputs: Vec<OutputFile>,
) -> Result<String> {
    let primary = outputs
        .first()
        .map(|o| o.file_name.clone())
        .ok_or_else(|| ScrapeError::processing("no output files were produced"))?;

    for output in &outputs {
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            output.file_name,
            output.bytes.len()
        );
        storage.write_file(&output.file_name, &output.bytes).await?;
    }

    Ok(Path::new(output_path).join(primary).display().to_string())
}
