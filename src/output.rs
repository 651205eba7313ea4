//! Text formatting for query results.
//!
//! Supports debug/JSON logging of any result plus the plain-text tables the
//! shell and the CLI print.

use std::fmt::{self, Debug, Write as _};

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{
    Distribution, NumericField, NumericStats, SatisfactionRates, ServiceAverage, ServiceRanking,
    SubsetSummary,
};
use crate::record::PassengerRecord;

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `1234567` -> `1,234,567`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One-decimal percentage, or `n/a` when there was nothing to divide by.
pub fn fmt_pct(pct: Option<f64>) -> String {
    match pct {
        Some(p) => format!("{p:.1}%"),
        None => "n/a".to_string(),
    }
}

/// Half-scale bar for a 0-100 percentage, at least one block wide.
pub fn bar(pct: f64) -> String {
    "█".repeat(((pct / 2.0) as usize).max(1))
}

/// Five-star rendering of a 0-5 rating.
pub fn stars(rating: f64) -> String {
    let filled = (rating.round().max(0.0) as usize).min(5);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Cuts `s` to `len` characters, marking the cut with `..`.
pub fn truncate(s: &str, len: usize) -> String {
    if s.chars().count() <= len {
        return s.to_string();
    }
    let kept: String = s.chars().take(len.saturating_sub(2)).collect();
    format!("{kept}..")
}

fn heading(title: &str) -> String {
    format!("\n════════════ {title} ════════════\n")
}

pub fn format_distribution(title: &str, dist: &Distribution) -> String {
    let mut out = heading(title);
    if dist.is_empty() {
        out.push_str("  No data.\n");
        return out;
    }

    let total = dist.total();
    for entry in dist.iter() {
        let pct = entry.count as f64 * 100.0 / total as f64;
        let _ = writeln!(
            out,
            "  {:<25}: {:>7} ({:5.1}%) {}",
            entry.category,
            thousands(entry.count),
            pct,
            bar(pct)
        );
    }
    let _ = writeln!(out, "\n  Total: {}", thousands(total));
    out
}

pub fn format_numeric_stats(field: NumericField, stats: Option<&NumericStats>) -> String {
    let mut out = heading(&format!("{} STATISTICS", field.label().to_uppercase()));
    let Some(stats) = stats else {
        out.push_str("  No data.\n");
        return out;
    };

    let s = &stats.summary;
    let _ = writeln!(out, "  {:<25}: {:.2}", "Minimum", s.min);
    let _ = writeln!(out, "  {:<25}: {:.2}", "Maximum", s.max);
    let _ = writeln!(out, "  {:<25}: {:.2}", "Average", s.mean);
    let _ = writeln!(out, "  {:<25}: {}", "Records", thousands(s.count));
    if let Some(delays) = stats.delays {
        let _ = writeln!(
            out,
            "  {:<25}: {}",
            "Flights with Delays",
            thousands(delays.delayed)
        );
        let _ = writeln!(
            out,
            "  {:<25}: {}",
            "On-Time Flights",
            thousands(delays.on_time)
        );
    }
    out
}

pub fn format_rates(title: &str, rates: &SatisfactionRates) -> String {
    let mut out = heading(title);
    if rates.is_empty() {
        out.push_str("  No data.\n");
        return out;
    }

    for entry in rates.iter() {
        let _ = writeln!(
            out,
            "  {:<20}: {:5.1}% satisfied ({} of {}) {}",
            entry.category,
            entry.rate,
            thousands(entry.satisfied),
            thousands(entry.total),
            bar(entry.rate)
        );
    }
    out
}

pub fn format_service_ratings(averages: &[ServiceAverage], overall: Option<f64>) -> String {
    let mut out = heading("ALL SERVICE RATINGS (Average out of 5.00)");
    if averages.is_empty() {
        out.push_str("  No data.\n");
        return out;
    }

    for avg in averages {
        let _ = writeln!(
            out,
            "  {:<35}: {:.2} {}",
            avg.name(),
            avg.mean,
            stars(avg.mean)
        );
    }
    if let Some(overall) = overall {
        let _ = writeln!(out, "\n  {:<35}: {:.2}", "OVERALL AVERAGE", overall);
    }
    out
}

/// Multi-line detail view of a single record.
pub fn format_record(r: &PassengerRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  ID: {}", r.id);
    let _ = writeln!(out, "  Gender: {}", r.gender);
    let _ = writeln!(out, "  Age: {}", r.age);
    let _ = writeln!(out, "  Customer Type: {}", r.customer_type);
    let _ = writeln!(out, "  Type of Travel: {}", r.type_of_travel);
    let _ = writeln!(out, "  Travel Class: {}", r.travel_class);
    let _ = writeln!(
        out,
        "  Flight Distance: {} miles",
        thousands(r.flight_distance as usize)
    );
    let _ = writeln!(
        out,
        "  Departure Delay: {:.1} min",
        r.departure_delay_minutes
    );
    let _ = writeln!(out, "  Arrival Delay: {:.1} min", r.arrival_delay_minutes);
    let _ = writeln!(
        out,
        "  Average Service Rating: {:.2}/5.00",
        r.average_service_rating()
    );
    let _ = writeln!(out, "  Satisfaction: {}", r.satisfaction);
    if let Some(date) = &r.flight_date {
        let _ = writeln!(out, "  Flight Date: {date}");
    }
    out
}

/// Fixed-width table, one record per line.
pub fn format_record_table<'r>(records: impl IntoIterator<Item = &'r PassengerRecord>) -> String {
    let mut out = format!(
        "{:<10} {:<8} {:<5} {:<18} {:<18} {:<10} {:<10} {:<12}\n",
        "ID", "Gender", "Age", "Customer Type", "Travel Type", "Class", "Distance", "Satisfaction"
    );
    for r in records {
        let _ = writeln!(
            out,
            "{:<10} {:<8} {:<5} {:<18} {:<18} {:<10} {:<10} {:<12}",
            truncate(&r.id, 10),
            truncate(&r.gender, 8),
            r.age,
            truncate(&r.customer_type, 16),
            truncate(&r.type_of_travel, 16),
            truncate(&r.travel_class, 10),
            r.flight_distance,
            r.satisfaction
        );
    }
    out
}

pub fn format_subset(title: &str, subset: &SubsetSummary) -> String {
    let mut out = heading("FILTER RESULTS");
    let _ = writeln!(out, "  {title}: {}", thousands(subset.size));
    if subset.size == 0 {
        return out;
    }

    let _ = writeln!(
        out,
        "  Satisfied: {} ({})",
        thousands(subset.satisfied),
        fmt_pct(subset.satisfied_pct)
    );
    let _ = writeln!(
        out,
        "  Dissatisfied: {} ({})",
        thousands(subset.size - subset.satisfied),
        fmt_pct(subset.satisfied_pct.map(|p| 100.0 - p))
    );
    if let Some(age) = subset.avg_age {
        let _ = writeln!(out, "  Average Age: {age:.1} years");
    }
    if let Some(distance) = subset.avg_distance {
        let _ = writeln!(out, "  Average Flight Distance: {distance:.1} miles");
    }
    out.push_str("\n  Class Distribution:\n");
    for entry in subset.classes.iter() {
        let _ = writeln!(out, "    - {}: {}", entry.category, thousands(entry.count));
    }
    out
}

impl fmt::Display for ServiceRanking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TOP {} RATED SERVICES:", self.top.len())?;
        for (i, avg) in self.top.iter().enumerate() {
            writeln!(f, "  {}. {}: {:.2}/5.00", i + 1, avg.name(), avg.mean)?;
        }

        writeln!(f, "\nBOTTOM {} RATED SERVICES:", self.bottom.len())?;
        // worst service is numbered 1
        let n = self.bottom.len();
        for (i, avg) in self.bottom.iter().enumerate() {
            writeln!(f, "  {}. {}: {:.2}/5.00", n - i, avg.name(), avg.mean)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::GroupCount;
    use crate::record::Service;
    use crate::record::tests::record;

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&record("1"));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&record("1")).unwrap();
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(25976), "25,976");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_fmt_pct() {
        assert_eq!(fmt_pct(Some(66.666)), "66.7%");
        assert_eq!(fmt_pct(None), "n/a");
    }

    #[test]
    fn test_bar_and_stars() {
        assert_eq!(bar(0.0).chars().count(), 1);
        assert_eq!(bar(50.0).chars().count(), 25);
        assert_eq!(stars(3.4), "★★★☆☆");
        assert_eq!(stars(4.6), "★★★★★");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Business travel", 16), "Business travel");
        assert_eq!(truncate("disloyal Customer", 16), "disloyal Custo..");
    }

    #[test]
    fn test_format_distribution() {
        let dist = Distribution {
            entries: vec![
                GroupCount {
                    category: "Male".into(),
                    count: 3,
                },
                GroupCount {
                    category: "Female".into(),
                    count: 1,
                },
            ],
        };
        let text = format_distribution("GENDER", &dist);
        assert!(text.contains("75.0%"));
        assert!(text.contains("Total: 4"));

        let empty = format_distribution("GENDER", &Distribution::default());
        assert!(empty.contains("No data."));
    }

    #[test]
    fn test_format_numeric_stats_without_data() {
        let text = format_numeric_stats(NumericField::Age, None);
        assert!(text.contains("No data."));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_ranking_display() {
        let ranking = ServiceRanking {
            top: vec![ServiceAverage {
                service: Service::SeatComfort,
                mean: 4.25,
            }],
            bottom: vec![
                ServiceAverage {
                    service: Service::GateLocation,
                    mean: 2.5,
                },
                ServiceAverage {
                    service: Service::InflightWifi,
                    mean: 2.0,
                },
            ],
        };
        let text = ranking.to_string();
        assert!(text.contains("  1. Seat Comfort: 4.25/5.00"));
        assert!(text.contains("  2. Gate Location: 2.50/5.00"));
        assert!(text.contains("  1. Inflight Wifi Service: 2.00/5.00"));
    }

    #[test]
    fn test_format_record_table() {
        let r = record("PAX1");
        let text = format_record_table([&r]);
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().nth(1).unwrap().starts_with("PAX1"));
    }
}
