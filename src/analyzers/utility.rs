use std::collections::HashMap;

use crate::analyzers::types::NumericSummary;
use crate::record::PassengerRecord;

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Percentage of `part` in `total`. Returns `None` when `total` is zero.
pub fn pct(part: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(part as f64 * 100.0 / total as f64)
    }
}

/// Single pass min/max/mean. Returns `None` for empty input.
pub fn summarize(values: impl IntoIterator<Item = f64>) -> Option<NumericSummary> {
    let mut values = values.into_iter();
    let first = values.next()?;

    let (mut min, mut max, mut sum, mut count) = (first, first, first, 1usize);
    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }

    // float rounding can push the mean a hair past an extreme
    let mean = (sum / count as f64).clamp(min, max);

    Some(NumericSummary {
        min,
        max,
        mean,
        count,
    })
}

/// Partitions records by `key`, keeping groups in first-seen order.
pub fn group_by<'r, I, F>(records: I, key: F) -> Vec<(&'r str, Vec<&'r PassengerRecord>)>
where
    I: IntoIterator<Item = &'r PassengerRecord>,
    F: Fn(&'r PassengerRecord) -> &'r str,
{
    let mut slots: HashMap<&'r str, usize> = HashMap::new();
    let mut groups: Vec<(&'r str, Vec<&'r PassengerRecord>)> = Vec::new();

    for record in records {
        let k = key(record);
        match slots.get(k) {
            Some(&i) => groups[i].1.push(record),
            None => {
                slots.insert(k, groups.len());
                groups.push((k, vec![record]));
            }
        }
    }

    groups
}
