use std::fmt;

use serde::Serialize;

use crate::analyzers::analyzer::Analyzer;
use crate::analyzers::types::{
    Category, Distribution, NumericField, NumericSummary, ServiceRanking,
};
use crate::analyzers::utility::pct;
use crate::output::{fmt_pct, thousands};

/// Fixed-order dataset summary: overview, gender, age, distance, services.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComprehensiveReport {
    pub total_records: usize,
    pub satisfied: usize,
    pub dissatisfied: usize,
    pub gender: Distribution,
    pub age: Option<NumericSummary>,
    pub distance: Option<NumericSummary>,
    pub overall_rating: Option<f64>,
    pub ranking: Option<ServiceRanking>,
}

impl ComprehensiveReport {
    pub fn build(analyzer: &Analyzer<'_>) -> Self {
        let total_records = analyzer.total_records();
        let satisfied = analyzer.count_satisfied();

        ComprehensiveReport {
            total_records,
            satisfied,
            dissatisfied: total_records - satisfied,
            gender: analyzer.distribution_by(Category::Gender),
            age: analyzer.numeric_stats(NumericField::Age).map(|s| s.summary),
            distance: analyzer
                .numeric_stats(NumericField::FlightDistance)
                .map(|s| s.summary),
            overall_rating: analyzer.overall_average_rating(),
            ranking: analyzer.service_ranking(),
        }
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "\n─────────────────── {title} ───────────────────")
}

impl fmt::Display for ComprehensiveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "AIRLINE PASSENGER SATISFACTION - DATA SUMMARY")?;

        section(f, "DATASET OVERVIEW")?;
        writeln!(f, "  Total Records: {}", thousands(self.total_records))?;
        writeln!(
            f,
            "  Satisfied Passengers: {} ({})",
            thousands(self.satisfied),
            fmt_pct(pct(self.satisfied, self.total_records))
        )?;
        writeln!(
            f,
            "  Dissatisfied Passengers: {} ({})",
            thousands(self.dissatisfied),
            fmt_pct(pct(self.dissatisfied, self.total_records))
        )?;

        section(f, "GENDER DISTRIBUTION")?;
        if self.gender.is_empty() {
            writeln!(f, "  No data.")?;
        }
        for entry in self.gender.iter() {
            writeln!(
                f,
                "  {}: {} ({})",
                entry.category,
                thousands(entry.count),
                fmt_pct(pct(entry.count, self.total_records))
            )?;
        }

        section(f, "AGE STATISTICS")?;
        match &self.age {
            Some(age) => {
                writeln!(f, "  Minimum Age: {:.1}", age.min)?;
                writeln!(f, "  Maximum Age: {:.1}", age.max)?;
                writeln!(f, "  Average Age: {:.1}", age.mean)?;
            }
            None => writeln!(f, "  No data.")?,
        }

        section(f, "FLIGHT DISTANCE")?;
        match &self.distance {
            Some(d) => {
                writeln!(f, "  Average Distance: {:.1} miles", d.mean)?;
                writeln!(f, "  Shortest Flight: {:.0} miles", d.min)?;
                writeln!(f, "  Longest Flight: {:.0} miles", d.max)?;
            }
            None => writeln!(f, "  No data.")?,
        }

        section(f, "SERVICE RATINGS SUMMARY")?;
        match (self.overall_rating, &self.ranking) {
            (Some(overall), Some(ranking)) => {
                writeln!(f, "  Overall Average Rating: {overall:.2} / 5.00")?;
                write!(f, "{ranking}")?;
            }
            _ => writeln!(f, "  No data.")?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::record::tests::record;

    #[test]
    fn test_report_sections_in_order() {
        let mut a = record("1");
        a.satisfaction = "satisfied".into();
        a.gender = "Male".into();
        a.age = 20;
        let b = record("2");
        let data = Dataset::from(vec![a, b]);

        let report = Analyzer::new(&data).comprehensive_report();
        assert_eq!(report.total_records, 2);
        assert_eq!(report.satisfied, 1);
        assert_eq!(report.dissatisfied, 1);
        assert_eq!(report.age.unwrap().mean, 30.0);

        let text = report.to_string();
        let order = [
            "DATASET OVERVIEW",
            "GENDER DISTRIBUTION",
            "AGE STATISTICS",
            "FLIGHT DISTANCE",
            "SERVICE RATINGS SUMMARY",
            "TOP 3 RATED SERVICES",
            "BOTTOM 3 RATED SERVICES",
        ];
        let positions: Vec<usize> = order.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(text.contains("Satisfied Passengers: 1 (50.0%)"));
        assert!(text.contains("Male: 1 (50.0%)"));
        assert!(text.contains("Overall Average Rating: 3.00 / 5.00"));
    }

    #[test]
    fn test_report_on_empty_dataset() {
        let data = Dataset::default();
        let report = Analyzer::new(&data).comprehensive_report();

        assert_eq!(report.total_records, 0);
        assert!(report.age.is_none());
        assert!(report.ranking.is_none());

        let text = report.to_string();
        assert!(text.contains("Satisfied Passengers: 0 (n/a)"));
        assert!(!text.contains("NaN"));
    }
}
