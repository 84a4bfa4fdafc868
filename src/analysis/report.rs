use crate::analysis::stats::{ColumnSummary, PriceSummary};
use crate::analysis::BookRecord;
use crate::domain::model::Rating;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn rating_label(rating: Option<Rating>) -> &'static str {
    rating.map(|r| r.as_str()).unwrap_or("-")
}

pub fn render_preview(records: &[BookRecord], rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3} | {:<40} | {:>8} | {:<14} | {:<6}",
        "#", "Title", "Price", "Availability", "Rating"
    );
    let _ = writeln!(out, "{}", "-".repeat(83));
    for (i, record) in records.iter().take(rows).enumerate() {
        let _ = writeln!(
            out,
            "{:>3} | {:<40} | {:>8.2} | {:<14} | {:<6}",
            i,
            truncate(&record.title, 37),
            record.price,
            truncate(&record.availability, 14),
            rating_label(record.rating)
        );
    }
    out
}

/// 欄位資訊：筆數與各欄非空值數量
pub fn render_info(records: &[BookRecord]) -> String {
    let titles = records.iter().filter(|r| !r.title.is_empty()).count();
    let availability = records.iter().filter(|r| !r.availability.is_empty()).count();
    let ratings = records.iter().filter(|r| r.rating.is_some()).count();

    let mut out = String::new();
    let _ = writeln!(out, "{} entries, 4 columns", records.len());
    let _ = writeln!(out, "{:<14} {:>9}  {}", "Column", "Non-Null", "Type");
    let _ = writeln!(out, "{:<14} {:>9}  {}", "Title", titles, "text");
    let _ = writeln!(out, "{:<14} {:>9}  {}", "Price", records.len(), "float");
    let _ = writeln!(out, "{:<14} {:>9}  {}", "Availability", availability, "text");
    let _ = writeln!(
        out,
        "{:<14} {:>9}  {}",
        "Rating", ratings, "ordered(one<two<three<four<five)"
    );
    out
}

pub fn render_description(prices: Option<&PriceSummary>, columns: &[ColumnSummary]) -> String {
    let mut out = String::new();

    match prices {
        Some(p) => {
            let std = p
                .std
                .map(|s| format!("{:.2}", s))
                .unwrap_or_else(|| "NaN".to_string());
            let _ = writeln!(out, "Price");
            let _ = writeln!(out, "  count {:>10}", p.count);
            let _ = writeln!(out, "  mean  {:>10.2}", p.mean);
            let _ = writeln!(out, "  std   {:>10}", std);
            let _ = writeln!(out, "  min   {:>10.2}", p.min);
            let _ = writeln!(out, "  25%   {:>10.2}", p.q25);
            let _ = writeln!(out, "  50%   {:>10.2}", p.median);
            let _ = writeln!(out, "  75%   {:>10.2}", p.q75);
            let _ = writeln!(out, "  max   {:>10.2}", p.max);
        }
        None => {
            let _ = writeln!(out, "Price: no data");
        }
    }

    for column in columns {
        let _ = writeln!(
            out,
            "{}: count={} unique={} top={} freq={}",
            column.name,
            column.count,
            column.unique,
            column.top.as_deref().map(|t| truncate(t, 40)).unwrap_or_else(|| "-".to_string()),
            column.freq
        );
    }
    out
}

/// Horizontal bar chart scaled so the largest value spans the full width.
pub fn render_bar_chart(title: &str, rows: &[(String, usize)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);

    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);

    for (label, count) in rows {
        let bar_len = if max == 0 { 0 } else { count * BAR_WIDTH / max };
        let _ = writeln!(
            out,
            "  {:<width$} | {} {}",
            label,
            "█".repeat(bar_len),
            count,
            width = label_width
        );
    }
    out
}

pub fn render_average_by_rating(averages: &[(Rating, f64)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Average Price by Rating:");
    for (rating, average) in averages {
        let _ = writeln!(out, "  {:<6} {:>8.2}", rating.as_str(), average);
    }
    out
}

pub fn render_price_list(title: &str, books: &[&BookRecord], currency_symbol: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    for book in books {
        let _ = writeln!(out, "{}: {}{:.2}", book.title, currency_symbol, book.price);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::tests::book;
    use crate::analysis::stats::{describe_prices, describe_text_columns};

    #[test]
    fn test_price_list_format() {
        let books = [book("Sharp Objects", 47.8, Some(Rating::Four))];
        let refs: Vec<&BookRecord> = books.iter().collect();

        let out = render_price_list("Top 5 Most Expensive Books:", &refs, "£");

        assert_eq!(out, "Top 5 Most Expensive Books:\nSharp Objects: £47.80\n");
    }

    #[test]
    fn test_bar_chart_scales_to_largest() {
        let rows = vec![("one".to_string(), 4), ("two".to_string(), 2), ("five".to_string(), 0)];

        let out = render_bar_chart("Distribution of Book Ratings", &rows);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "Distribution of Book Ratings");
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[3].ends_with("|  0"));
    }

    #[test]
    fn test_bar_chart_all_zero() {
        let out = render_bar_chart("Empty", &[("one".to_string(), 0)]);
        assert!(!out.contains('█'));
    }

    #[test]
    fn test_description_lists_price_and_columns() {
        let books = vec![book("A", 10.0, Some(Rating::Two)), book("B", 20.0, None)];

        let out = render_description(describe_prices(&books).as_ref(), &describe_text_columns(&books));

        assert!(out.contains("mean       15.00"));
        assert!(out.contains("Rating: count=1 unique=1 top=two freq=1"));
    }

    #[test]
    fn test_info_counts_missing_ratings() {
        let books = vec![book("A", 10.0, Some(Rating::Two)), book("B", 20.0, None)];
        let out = render_info(&books);
        assert!(out.starts_with("2 entries"));
        assert!(out.lines().any(|l| l.starts_with("Rating") && l.contains(" 1 ")));
    }
}
