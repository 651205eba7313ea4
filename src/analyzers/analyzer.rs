use crate::analyzers::aggregate::{
    RANKING_SIZE, count_by, rank_services, service_averages, summarize_subset,
};
use crate::analyzers::report::ComprehensiveReport;
use crate::analyzers::types::{
    Category, DelayCounts, Distribution, GroupRate, NumericField, NumericStats, NumericSummary,
    SatisfactionRates, ServiceAverage, ServiceRanking, SubsetSummary,
};
use crate::analyzers::utility::{group_by, mean, pct, summarize};
use crate::dataset::Dataset;
use crate::record::PassengerRecord;

/// Read-only query interface over a loaded [`Dataset`].
///
/// Every query is a single pass over the records. Queries that need at
/// least one record return `None` on empty input instead of dividing by zero.
#[derive(Debug, Clone, Copy)]
pub struct Analyzer<'a> {
    data: &'a Dataset,
}

impl<'a> Analyzer<'a> {
    pub fn new(data: &'a Dataset) -> Self {
        Self { data }
    }

    pub fn total_records(&self) -> usize {
        self.data.len()
    }

    // primitives

    /// Counts records per distinct value of `key`, in first-seen order.
    pub fn group_count<F>(&self, key: F) -> Distribution
    where
        F: Fn(&'a PassengerRecord) -> &'a str,
    {
        count_by(self.data, key)
    }

    pub fn numeric_summary<F>(&self, value: F) -> Option<NumericSummary>
    where
        F: Fn(&PassengerRecord) -> f64,
    {
        summarize(self.data.iter().map(value))
    }

    /// Percentage of each group whose satisfaction is the satisfied token.
    ///
    /// Each rate is relative to its own group size.
    pub fn satisfaction_rate<F>(&self, key: F) -> SatisfactionRates
    where
        F: Fn(&'a PassengerRecord) -> &'a str,
    {
        let entries = group_by(self.data, key)
            .into_iter()
            .map(|(category, members)| {
                let satisfied = members.iter().filter(|r| r.is_satisfied()).count();
                GroupRate {
                    category: category.to_string(),
                    total: members.len(),
                    satisfied,
                    // groups are never empty
                    rate: pct(satisfied, members.len()).unwrap_or_default(),
                }
            })
            .collect();

        SatisfactionRates { entries }
    }

    /// Records matching `predicate`, in load order.
    pub fn filter<P>(&self, predicate: P) -> Vec<&'a PassengerRecord>
    where
        P: Fn(&PassengerRecord) -> bool,
    {
        self.data.iter().filter(|&r| predicate(r)).collect()
    }

    /// First record with this id, in load order.
    pub fn find_by_id(&self, id: &str) -> Option<&'a PassengerRecord> {
        let id = id.trim();
        self.data.iter().find(|r| r.id == id)
    }

    /// Records whose date token equals `date` exactly.
    pub fn find_by_date(&self, date: &str) -> Vec<&'a PassengerRecord> {
        let date = date.trim();
        self.filter(|r| r.flight_date.as_deref() == Some(date))
    }

    // business queries

    /// Distribution over a dimension. Bucket dimensions come back in range
    /// order, free-text ones in first-seen order.
    pub fn distribution_by(&self, category: Category) -> Distribution {
        let mut dist = self.group_count(|r| category.key(r));
        if category.is_bucketed() {
            dist.entries
                .sort_by_key(|e| category.bucket_rank(&e.category));
        }
        dist
    }

    pub fn numeric_stats(&self, field: NumericField) -> Option<NumericStats> {
        let summary = self.numeric_summary(|r| field.value(r))?;

        let delays = field.is_delay().then(|| {
            let delayed = self.data.iter().filter(|r| field.value(r) > 0.0).count();
            DelayCounts {
                delayed,
                on_time: self.data.len() - delayed,
            }
        });

        Some(NumericStats {
            field,
            summary,
            delays,
        })
    }

    /// Per-service means in declaration order; empty when there is no data.
    pub fn average_service_ratings(&self) -> Vec<ServiceAverage> {
        service_averages(self.data)
    }

    /// Mean of the per-service means.
    pub fn overall_average_rating(&self) -> Option<f64> {
        let means: Vec<f64> = self
            .average_service_ratings()
            .iter()
            .map(|a| a.mean)
            .collect();
        mean(&means)
    }

    /// Top and bottom three services by mean rating.
    pub fn service_ranking(&self) -> Option<ServiceRanking> {
        rank_services(&self.average_service_ratings(), RANKING_SIZE)
    }

    pub fn satisfaction_rate_by(&self, category: Category) -> SatisfactionRates {
        let mut rates = self.satisfaction_rate(|r| category.key(r));
        if category.is_bucketed() {
            rates
                .entries
                .sort_by_key(|e| category.bucket_rank(&e.category));
        }
        rates
    }

    pub fn filter_by_class(&self, class: &str) -> Vec<&'a PassengerRecord> {
        let class = class.trim();
        self.filter(|r| r.travel_class.eq_ignore_ascii_case(class))
    }

    /// Records with `min <= age <= max`.
    pub fn filter_by_age_range(&self, min: u32, max: u32) -> Vec<&'a PassengerRecord> {
        self.filter(|r| (min..=max).contains(&r.age))
    }

    pub fn filter_by_satisfaction(&self, satisfied: bool) -> Vec<&'a PassengerRecord> {
        self.filter(|r| r.is_satisfied() == satisfied)
    }

    pub fn count_satisfied(&self) -> usize {
        self.data.iter().filter(|r| r.is_satisfied()).count()
    }

    /// Record with the greatest flight distance; the earliest wins a tie.
    pub fn longest_flight(&self) -> Option<&'a PassengerRecord> {
        self.data.iter().reduce(|best, r| {
            if r.flight_distance > best.flight_distance {
                r
            } else {
                best
            }
        })
    }

    /// The first `n` records in load order.
    pub fn sample(&self, n: usize) -> &'a [PassengerRecord] {
        let records = self.data.records();
        &records[..n.min(records.len())]
    }

    pub fn subset_summary(&self, records: &[&PassengerRecord]) -> SubsetSummary {
        summarize_subset(records)
    }

    pub fn comprehensive_report(&self) -> ComprehensiveReport {
        ComprehensiveReport::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::record;
    use crate::record::{SERVICE_COUNT, Service};

    fn passenger(id: &str, age: u32, class: &str, satisfaction: &str) -> PassengerRecord {
        let mut r = record(id);
        r.age = age;
        r.travel_class = class.to_string();
        r.satisfaction = satisfaction.to_string();
        r
    }

    fn sample_data() -> Dataset {
        let mut a = passenger("1", 17, "Business", "satisfied");
        a.gender = "Male".into();
        a.flight_distance = 3500;
        a.departure_delay_minutes = 12.0;
        a.flight_date = Some("2023-01-01".into());

        let mut b = passenger("2", 30, "Eco", "neutral or dissatisfied");
        b.flight_distance = 450;
        b.arrival_delay_minutes = 5.0;
        b.flight_date = Some("2023-01-02".into());

        let mut c = passenger("3", 65, "business", "Satisfied");
        c.flight_distance = 3500;
        c.flight_date = Some("2023-01-01".into());

        let d = passenger("2", 44, "Eco Plus", "neutral or dissatisfied");

        Dataset::from(vec![a, b, c, d])
    }

    #[test]
    fn test_total_records() {
        let data = sample_data();
        assert_eq!(Analyzer::new(&data).total_records(), 4);
    }

    #[test]
    fn test_distribution_sums_to_total() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        for category in [
            Category::Gender,
            Category::CustomerType,
            Category::TravelType,
            Category::TravelClass,
            Category::Satisfaction,
            Category::AgeGroup,
            Category::DistanceCategory,
        ] {
            assert_eq!(analyzer.distribution_by(category).total(), 4);
        }
    }

    #[test]
    fn test_distribution_uses_observed_values() {
        let data = sample_data();
        let dist = Analyzer::new(&data).distribution_by(Category::TravelClass);

        // grouping is exact; "business" and "Business" are distinct keys
        assert_eq!(dist.len(), 4);
        assert_eq!(dist.get("Business"), Some(1));
        assert_eq!(dist.get("business"), Some(1));
        assert_eq!(dist.get("First"), None);
    }

    #[test]
    fn test_age_group_distribution_in_bucket_order() {
        let data = sample_data();
        let dist = Analyzer::new(&data).distribution_by(Category::AgeGroup);

        let labels: Vec<_> = dist.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(labels, vec!["Under 18", "30-44", "60+"]);
        assert_eq!(dist.get("30-44"), Some(2));
    }

    #[test]
    fn test_distance_distribution() {
        let data = sample_data();
        let dist = Analyzer::new(&data).distribution_by(Category::DistanceCategory);

        assert_eq!(dist.entries[0].category, "Short (<500 mi)");
        assert_eq!(dist.get("Very Long (3000+ mi)"), Some(2));
        assert_eq!(dist.get("Medium (500-1500 mi)"), Some(1));
    }

    #[test]
    fn test_numeric_stats_age() {
        let data = sample_data();
        let stats = Analyzer::new(&data)
            .numeric_stats(NumericField::Age)
            .unwrap();

        assert_eq!(stats.summary.min, 17.0);
        assert_eq!(stats.summary.max, 65.0);
        assert_eq!(stats.summary.mean, 39.0);
        assert_eq!(stats.summary.count, 4);
        assert!(stats.delays.is_none());
    }

    #[test]
    fn test_numeric_stats_delay_counts() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        let dep = analyzer
            .numeric_stats(NumericField::DepartureDelay)
            .unwrap();
        assert_eq!(dep.summary.max, 12.0);
        assert_eq!(dep.summary.mean, 3.0);
        assert_eq!(
            dep.delays,
            Some(DelayCounts {
                delayed: 1,
                on_time: 3
            })
        );

        let arr = analyzer.numeric_stats(NumericField::ArrivalDelay).unwrap();
        assert_eq!(arr.delays.unwrap().delayed, 1);
    }

    #[test]
    fn test_empty_dataset_queries() {
        let data = Dataset::default();
        let analyzer = Analyzer::new(&data);

        assert_eq!(analyzer.total_records(), 0);
        assert!(analyzer.distribution_by(Category::Gender).is_empty());
        assert!(analyzer.numeric_stats(NumericField::Age).is_none());
        assert!(
            analyzer
                .satisfaction_rate_by(Category::TravelClass)
                .is_empty()
        );
        assert!(analyzer.average_service_ratings().is_empty());
        assert!(analyzer.overall_average_rating().is_none());
        assert!(analyzer.service_ranking().is_none());
        assert!(analyzer.find_by_id("1").is_none());
        assert!(analyzer.longest_flight().is_none());
        assert!(analyzer.sample(10).is_empty());
    }

    #[test]
    fn test_satisfaction_rate_by_class() {
        let mut records = Vec::new();
        for (i, sat) in ["satisfied", "satisfied", "neutral or dissatisfied"]
            .iter()
            .enumerate()
        {
            records.push(passenger(&i.to_string(), 40, "Business", sat));
        }
        records.push(passenger("9", 40, "Eco", "neutral or dissatisfied"));
        let data = Dataset::from(records);
        let analyzer = Analyzer::new(&data);

        let rates = analyzer.satisfaction_rate_by(Category::TravelClass);
        let business = rates.get("Business").unwrap();
        assert!((business - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(rates.get("Eco"), Some(0.0));

        // recompute by hand
        let members = analyzer.filter_by_class("Business");
        let satisfied = members.iter().filter(|r| r.is_satisfied()).count();
        let manual = satisfied as f64 * 100.0 / members.len() as f64;
        assert_eq!(format!("{business:.1}"), format!("{manual:.1}"));
    }

    #[test]
    fn test_satisfaction_rate_by_age_group_is_self_relative() {
        let data = sample_data();
        let rates = Analyzer::new(&data).satisfaction_rate_by(Category::AgeGroup);

        assert_eq!(rates.get("Under 18"), Some(100.0));
        assert_eq!(rates.get("30-44"), Some(0.0));
        assert_eq!(rates.get("60+"), Some(100.0));
        assert_eq!(rates.entries[1].total, 2);
    }

    #[test]
    fn test_filter_by_class_ignores_case() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        let ids: Vec<_> = analyzer
            .filter_by_class(" BUSINESS ")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(analyzer.filter_by_class("First").is_empty());
    }

    #[test]
    fn test_filter_by_age_range_inclusive() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        let hits = analyzer.filter_by_age_range(30, 30);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], &data.records()[1]);

        assert_eq!(analyzer.filter_by_age_range(17, 44).len(), 3);
        assert!(analyzer.filter_by_age_range(50, 20).is_empty());
    }

    #[test]
    fn test_filter_by_satisfaction() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        assert_eq!(analyzer.filter_by_satisfaction(true).len(), 2);
        assert_eq!(analyzer.filter_by_satisfaction(false).len(), 2);
        assert_eq!(analyzer.count_satisfied(), 2);
    }

    #[test]
    fn test_find_by_id_returns_first_duplicate() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        let found = analyzer.find_by_id("2").unwrap();
        assert_eq!(found.age, 30);
        assert!(analyzer.find_by_id("404").is_none());
    }

    #[test]
    fn test_find_by_date() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        let ids: Vec<_> = analyzer
            .find_by_date("2023-01-01")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(analyzer.find_by_date("01:01:2023").is_empty());
    }

    #[test]
    fn test_sample_and_longest_flight() {
        let data = sample_data();
        let analyzer = Analyzer::new(&data);

        assert_eq!(analyzer.sample(2).len(), 2);
        assert_eq!(analyzer.sample(2)[0].id, "1");
        assert_eq!(analyzer.sample(100).len(), 4);

        // ids 1 and 3 tie on distance; load order wins
        assert_eq!(analyzer.longest_flight().unwrap().id, "1");
    }

    #[test]
    fn test_service_ranking_is_deterministic_with_ties() {
        let mut records = Vec::new();
        for i in 0..3 {
            let mut r = record(&i.to_string());
            r.ratings = [2; SERVICE_COUNT];
            r.ratings[Service::OnlineBoarding.index()] = 5;
            r.ratings[Service::GateLocation.index()] = 5;
            r.ratings[Service::Cleanliness.index()] = 4;
            r.ratings[Service::InflightWifi.index()] = 1;
            records.push(r);
        }
        let data = Dataset::from(records);
        let analyzer = Analyzer::new(&data);

        let first = analyzer.service_ranking().unwrap();
        let second = analyzer.service_ranking().unwrap();
        assert_eq!(first, second);

        let top: Vec<_> = first.top.iter().map(|a| a.service).collect();
        assert_eq!(
            top,
            vec![
                Service::GateLocation,
                Service::OnlineBoarding,
                Service::Cleanliness
            ]
        );
        assert_eq!(first.bottom.last().unwrap().service, Service::InflightWifi);
    }

    #[test]
    fn test_overall_average_rating() {
        let data = sample_data();
        assert_eq!(Analyzer::new(&data).overall_average_rating(), Some(3.0));
    }
}
