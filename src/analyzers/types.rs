//! Query selectors and fixed-shape result types.

use serde::Serialize;

use crate::analyzers::buckets::{AgeGroup, DistanceCategory};
use crate::record::{PassengerRecord, Service};

/// Categorical dimension a distribution or rate can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum Category {
    Gender,
    CustomerType,
    TravelType,
    TravelClass,
    Satisfaction,
    AgeGroup,
    DistanceCategory,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Gender => "Gender",
            Category::CustomerType => "Customer Type",
            Category::TravelType => "Travel Type",
            Category::TravelClass => "Travel Class",
            Category::Satisfaction => "Satisfaction",
            Category::AgeGroup => "Age Group",
            Category::DistanceCategory => "Flight Distance Category",
        }
    }

    /// Group key of `record` along this dimension.
    pub fn key(self, record: &PassengerRecord) -> &str {
        match self {
            Category::Gender => &record.gender,
            Category::CustomerType => &record.customer_type,
            Category::TravelType => &record.type_of_travel,
            Category::TravelClass => &record.travel_class,
            Category::Satisfaction => &record.satisfaction,
            Category::AgeGroup => record.age_group().label(),
            Category::DistanceCategory => record.distance_category().label(),
        }
    }

    /// Whether this dimension is a fixed set of numeric ranges.
    pub fn is_bucketed(self) -> bool {
        matches!(self, Category::AgeGroup | Category::DistanceCategory)
    }

    /// Position of a bucket label in range order; `None` for free-text dimensions.
    pub fn bucket_rank(self, label: &str) -> Option<usize> {
        match self {
            Category::AgeGroup => AgeGroup::ALL.iter().position(|g| g.label() == label),
            Category::DistanceCategory => DistanceCategory::ALL
                .iter()
                .position(|d| d.label() == label),
            _ => None,
        }
    }
}

/// Numeric column a summary can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum NumericField {
    Age,
    FlightDistance,
    DepartureDelay,
    ArrivalDelay,
}

impl NumericField {
    pub fn label(self) -> &'static str {
        match self {
            NumericField::Age => "Age",
            NumericField::FlightDistance => "Flight Distance",
            NumericField::DepartureDelay => "Departure Delay (min)",
            NumericField::ArrivalDelay => "Arrival Delay (min)",
        }
    }

    pub fn value(self, record: &PassengerRecord) -> f64 {
        match self {
            NumericField::Age => f64::from(record.age),
            NumericField::FlightDistance => f64::from(record.flight_distance),
            NumericField::DepartureDelay => record.departure_delay_minutes,
            NumericField::ArrivalDelay => record.arrival_delay_minutes,
        }
    }

    pub fn is_delay(self) -> bool {
        matches!(
            self,
            NumericField::DepartureDelay | NumericField::ArrivalDelay
        )
    }
}

/// Member count of one observed category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCount {
    pub category: String,
    pub count: usize,
}

/// Counts per observed category. Unseen categories are absent, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub entries: Vec<GroupCount>,
}

impl Distribution {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupCount> {
        self.entries.iter()
    }
}

/// Min/max/mean over a non-empty numeric projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

/// Delayed versus on-time split for a delay column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DelayCounts {
    /// Records with a delay strictly greater than zero.
    pub delayed: usize,
    pub on_time: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub field: NumericField,
    pub summary: NumericSummary,
    /// Present only for delay fields.
    pub delays: Option<DelayCounts>,
}

/// Satisfaction rate within one category. `rate` is relative to `total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRate {
    pub category: String,
    pub total: usize,
    pub satisfied: usize,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatisfactionRates {
    pub entries: Vec<GroupRate>,
}

impl SatisfactionRates {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.rate)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupRate> {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceAverage {
    pub service: Service,
    pub mean: f64,
}

impl ServiceAverage {
    pub fn name(&self) -> &'static str {
        self.service.label()
    }
}

/// Best and worst rated services, both in descending order of mean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceRanking {
    pub top: Vec<ServiceAverage>,
    pub bottom: Vec<ServiceAverage>,
}

/// Profile of a filtered subset of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubsetSummary {
    pub size: usize,
    pub satisfied: usize,
    pub satisfied_pct: Option<f64>,
    pub avg_age: Option<f64>,
    pub avg_distance: Option<f64>,
    pub classes: Distribution,
}
