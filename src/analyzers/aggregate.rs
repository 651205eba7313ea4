use crate::analyzers::types::{
    Distribution, GroupCount, ServiceAverage, ServiceRanking, SubsetSummary,
};
use crate::analyzers::utility::{group_by, pct, summarize};
use crate::record::{PassengerRecord, SERVICE_COUNT, Service};

/// How many services each end of a ranking reports.
pub const RANKING_SIZE: usize = 3;

/// Mean of every service rating across `records`, in declaration order.
///
/// Returns an empty list when there are no records.
pub fn service_averages<'r>(
    records: impl IntoIterator<Item = &'r PassengerRecord>,
) -> Vec<ServiceAverage> {
    let mut sums = [0u64; SERVICE_COUNT];
    let mut n = 0usize;

    for record in records {
        n += 1;
        for (sum, &rating) in sums.iter_mut().zip(record.ratings.iter()) {
            *sum += u64::from(rating);
        }
    }

    if n == 0 {
        return Vec::new();
    }

    Service::ALL
        .iter()
        .map(|&service| ServiceAverage {
            service,
            mean: sums[service.index()] as f64 / n as f64,
        })
        .collect()
}

/// Sorts services by descending mean and keeps `size` from each end.
///
/// The sort is stable, so equal means keep declaration order.
pub fn rank_services(averages: &[ServiceAverage], size: usize) -> Option<ServiceRanking> {
    if averages.is_empty() {
        return None;
    }

    let mut sorted = averages.to_vec();
    sorted.sort_by(|a, b| b.mean.total_cmp(&a.mean));

    let top = sorted.iter().take(size).copied().collect();
    let bottom = sorted[sorted.len().saturating_sub(size)..].to_vec();

    Some(ServiceRanking { top, bottom })
}

/// Counts `records` per category, in first-seen order.
pub fn count_by<'r, F>(
    records: impl IntoIterator<Item = &'r PassengerRecord>,
    key: F,
) -> Distribution
where
    F: Fn(&'r PassengerRecord) -> &'r str,
{
    let entries = group_by(records, key)
        .into_iter()
        .map(|(category, members)| GroupCount {
            category: category.to_string(),
            count: members.len(),
        })
        .collect();

    Distribution { entries }
}

/// Profiles an already filtered set of records.
pub fn summarize_subset(records: &[&PassengerRecord]) -> SubsetSummary {
    let size = records.len();
    let satisfied = records.iter().filter(|r| r.is_satisfied()).count();

    SubsetSummary {
        size,
        satisfied,
        satisfied_pct: pct(satisfied, size),
        avg_age: summarize(records.iter().map(|r| f64::from(r.age))).map(|s| s.mean),
        avg_distance: summarize(records.iter().map(|r| f64::from(r.flight_distance)))
            .map(|s| s.mean),
        classes: count_by(records.iter().copied(), |r| r.travel_class.as_str()),
    }
}
