use crate::analysis::BookRecord;
use crate::domain::model::Rating;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Words left out of the title word chart.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "for", "from", "in", "into", "is", "it", "its", "of",
    "on", "or", "our", "the", "to", "vol", "with", "you", "your",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSummary {
    pub count: usize,
    pub mean: f64,
    /// 樣本標準差；少於兩筆時為 `None`
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub name: &'static str,
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

pub fn describe_prices(records: &[BookRecord]) -> Option<PriceSummary> {
    if records.is_empty() {
        return None;
    }

    let mut prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let count = prices.len();
    let mean = prices.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let variance =
            prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    });

    Some(PriceSummary {
        count,
        mean,
        std,
        min: prices[0],
        q25: quantile(&prices, 0.25),
        median: quantile(&prices, 0.5),
        q75: quantile(&prices, 0.75),
        max: prices[count - 1],
    })
}

/// count/unique/top/freq over the non-empty values; ties keep the value seen first.
fn summarize_column<'a>(
    name: &'static str,
    values: impl Iterator<Item = Option<&'a str>>,
) -> ColumnSummary {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for value in values.flatten() {
        let entry = counts.entry(value).or_insert(0);
        if *entry == 0 {
            order.push(value);
        }
        *entry += 1;
    }

    let mut top: Option<&str> = None;
    let mut freq = 0;
    for value in &order {
        if counts[value] > freq {
            top = Some(*value);
            freq = counts[value];
        }
    }

    ColumnSummary {
        name,
        count: counts.values().sum(),
        unique: order.len(),
        top: top.map(str::to_string),
        freq,
    }
}

pub fn describe_text_columns(records: &[BookRecord]) -> Vec<ColumnSummary> {
    vec![
        summarize_column("Title", records.iter().map(|r| Some(r.title.as_str()))),
        summarize_column(
            "Availability",
            records
                .iter()
                .map(|r| Some(r.availability.as_str()).filter(|s| !s.is_empty())),
        ),
        summarize_column("Rating", records.iter().map(|r| r.rating.map(|x| x.as_str()))),
    ]
}

/// Count per rating for all five ratings, in rating order.
pub fn rating_distribution(records: &[BookRecord]) -> Vec<(Rating, usize)> {
    Rating::ALL
        .iter()
        .map(|rating| {
            let count = records.iter().filter(|r| r.rating == Some(*rating)).count();
            (*rating, count)
        })
        .collect()
}

/// 各星等平均價格（只含有資料的星等），由低到高排序
pub fn average_price_by_rating(records: &[BookRecord]) -> Vec<(Rating, f64)> {
    let mut averages: Vec<(Rating, f64)> = Rating::ALL
        .iter()
        .filter_map(|rating| {
            let prices: Vec<f64> = records
                .iter()
                .filter(|r| r.rating == Some(*rating))
                .map(|r| r.price)
                .collect();
            (!prices.is_empty())
                .then(|| (*rating, prices.iter().sum::<f64>() / prices.len() as f64))
        })
        .collect();

    averages.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    averages
}

fn ranked_by_price(records: &[BookRecord], n: usize, descending: bool) -> Vec<&BookRecord> {
    let mut ranked: Vec<&BookRecord> = records.iter().collect();
    ranked.sort_by(|a, b| {
        let order = a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal);
        if descending {
            order.reverse()
        } else {
            order
        }
    });
    ranked.truncate(n);
    ranked
}

/// 最貴的 n 本書；同價時保留先出現者
pub fn most_expensive(records: &[BookRecord], n: usize) -> Vec<&BookRecord> {
    ranked_by_price(records, n, true)
}

pub fn cheapest(records: &[BookRecord], n: usize) -> Vec<&BookRecord> {
    ranked_by_price(records, n, false)
}

/// Lower-cased title words without stopwords, most frequent first.
pub fn title_word_frequencies(records: &[BookRecord], top: usize) -> Vec<(String, usize)> {
    let word = match Regex::new(r"[A-Za-z][A-Za-z']+") {
        Ok(word) => word,
        Err(e) => {
            tracing::error!("Invalid word pattern: {}", e);
            return Vec::new();
        }
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        for found in word.find_iter(&record.title) {
            let lowered = found.as_str().to_lowercase();
            if !STOPWORDS.contains(&lowered.as_str()) {
                *counts.entry(lowered).or_insert(0) += 1;
            }
        }
    }

    let mut frequencies: Vec<(String, usize)> = counts.into_iter().collect();
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    frequencies.truncate(top);
    frequencies
}
