use clap::Parser;
use scrape_etl::config::cli::MenuArgs;
use scrape_etl::utils::{logger, validation::Validate};
use scrape_etl::{EtlEngine, LocalStorage, MenuPipeline, ScrapeError};

fn fail(e: ScrapeError) -> ! {
    tracing::error!(
        "❌ Menu scrape failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ Failed to retrieve the menu. {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = MenuArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting scrape-etl menu scraper");

    let settings = args.resolve().unwrap_or_else(|e| fail(e));
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(e);
    }
    tracing::debug!("Menu settings: {:?}", settings);

    let storage = LocalStorage::new(settings.output_path.clone());
    let pipeline = MenuPipeline::new(storage, settings).unwrap_or_else(|e| fail(e));
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Menu scrape completed successfully!");
            println!("Menu data successfully saved and formatted to {}", output_path);
        }
        Err(e) => fail(e),
    }

    Ok(())
}
