use clap::Parser;
use scrape_etl::analysis::{load_books, report, stats};
use scrape_etl::config::cli::AnalyzeArgs;
use scrape_etl::utils::{logger, validation::Validate};
use scrape_etl::{LocalStorage, ScrapeError};

fn fail(e: ScrapeError) -> ! {
    tracing::error!(
        "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = AnalyzeArgs::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let settings = args.resolve().unwrap_or_else(|e| fail(e));
    if let Err(e) = settings.validate() {
        fail(e);
    }

    // 相對路徑以目前工作目錄為準
    let storage = LocalStorage::new(".".to_string());
    let books = match load_books(&storage, &settings.input_path, &settings.currency_symbol).await {
        Ok(Some(books)) => books,
        Ok(None) => {
            eprintln!("Error: File not found at {}", settings.input_path);
            return Ok(());
        }
        Err(e) => fail(e),
    };

    println!("{}", report::render_preview(&books, 5));
    println!("{}", report::render_info(&books));
    println!(
        "{}",
        report::render_description(
            stats::describe_prices(&books).as_ref(),
            &stats::describe_text_columns(&books)
        )
    );

    let distribution: Vec<(String, usize)> = stats::rating_distribution(&books)
        .into_iter()
        .map(|(rating, count)| (rating.to_string(), count))
        .collect();
    println!(
        "{}",
        report::render_bar_chart("Distribution of Book Ratings", &distribution)
    );

    println!(
        "{}",
        report::render_average_by_rating(&stats::average_price_by_rating(&books))
    );

    println!(
        "{}",
        report::render_price_list(
            &format!("Top {} Most Expensive Books:", settings.top_n),
            &stats::most_expensive(&books, settings.top_n),
            &settings.currency_symbol
        )
    );
    println!(
        "{}",
        report::render_price_list(
            &format!("Top {} Cheapest Books:", settings.top_n),
            &stats::cheapest(&books, settings.top_n),
            &settings.currency_symbol
        )
    );

    println!(
        "{}",
        report::render_bar_chart(
            "Most Common Title Words",
            &stats::title_word_frequencies(&books, settings.top_words)
        )
    );

    Ok(())
}
