use clap::Parser;
use scrape_etl::config::cli::CatalogArgs;
use scrape_etl::utils::{logger, validation::Validate};
use scrape_etl::{CatalogPipeline, EtlEngine, LocalStorage, ScrapeError};

fn fail(e: ScrapeError) -> ! {
    tracing::error!(
        "❌ Catalog scrape failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CatalogArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting scrape-etl catalog scraper");

    let settings = args.resolve().unwrap_or_else(|e| fail(e));
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(e);
    }
    tracing::debug!("Catalog settings: {:?}", settings);

    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = CatalogPipeline::new(storage, settings).unwrap_or_else(|e| fail(e));
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Catalog scrape completed successfully!");
            println!("Data successfully extracted and saved to {}", output_path);
        }
        Err(e) => fail(e),
    }

    Ok(())
}
