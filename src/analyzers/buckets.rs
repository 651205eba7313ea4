use serde::Serialize;

/// Fixed age ranges, lower bound inclusive.
///
/// | Range  | Group    |
/// |--------|----------|
/// | < 18   | Under 18 |
/// | 18..30 | 18-29    |
/// | 30..45 | 30-44    |
/// | 45..60 | 45-59    |
/// | >= 60  | 60+      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AgeGroup {
    Under18,
    Young,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::Under18,
        AgeGroup::Young,
        AgeGroup::Adult,
        AgeGroup::MiddleAged,
        AgeGroup::Senior,
    ];

    pub fn from_age(age: u32) -> Self {
        match age {
            a if a < 18 => AgeGroup::Under18,
            a if a < 30 => AgeGroup::Young,
            a if a < 45 => AgeGroup::Adult,
            a if a < 60 => AgeGroup::MiddleAged,
            _ => AgeGroup::Senior,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Under18 => "Under 18",
            AgeGroup::Young => "18-29",
            AgeGroup::Adult => "30-44",
            AgeGroup::MiddleAged => "45-59",
            AgeGroup::Senior => "60+",
        }
    }
}

/// Fixed flight-distance ranges in miles, lower bound inclusive.
///
/// | Range      | Category  |
/// |------------|-----------|
/// | < 500      | Short     |
/// | 500..1500  | Medium    |
/// | 1500..3000 | Long      |
/// | >= 3000    | Very Long |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DistanceCategory {
    Short,
    Medium,
    Long,
    VeryLong,
}

impl DistanceCategory {
    pub const ALL: [DistanceCategory; 4] = [
        DistanceCategory::Short,
        DistanceCategory::Medium,
        DistanceCategory::Long,
        DistanceCategory::VeryLong,
    ];

    pub fn from_distance(miles: u32) -> Self {
        match miles {
            d if d < 500 => DistanceCategory::Short,
            d if d < 1500 => DistanceCategory::Medium,
            d if d < 3000 => DistanceCategory::Long,
            _ => DistanceCategory::VeryLong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DistanceCategory::Short => "Short (<500 mi)",
            DistanceCategory::Medium => "Medium (500-1500 mi)",
            DistanceCategory::Long => "Long (1500-3000 mi)",
            DistanceCategory::VeryLong => "Very Long (3000+ mi)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(AgeGroup::from_age(0), AgeGroup::Under18);
        assert_eq!(AgeGroup::from_age(17), AgeGroup::Under18);
        assert_eq!(AgeGroup::from_age(18), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(29), AgeGroup::Young);
        assert_eq!(AgeGroup::from_age(30), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(44), AgeGroup::Adult);
        assert_eq!(AgeGroup::from_age(45), AgeGroup::MiddleAged);
        assert_eq!(AgeGroup::from_age(59), AgeGroup::MiddleAged);
        assert_eq!(AgeGroup::from_age(60), AgeGroup::Senior);
        assert_eq!(AgeGroup::from_age(u32::MAX), AgeGroup::Senior);
    }

    #[test]
    fn test_distance_boundaries() {
        assert_eq!(DistanceCategory::from_distance(0), DistanceCategory::Short);
        assert_eq!(DistanceCategory::from_distance(499), DistanceCategory::Short);
        assert_eq!(DistanceCategory::from_distance(500), DistanceCategory::Medium);
        assert_eq!(DistanceCategory::from_distance(1499), DistanceCategory::Medium);
        assert_eq!(DistanceCategory::from_distance(1500), DistanceCategory::Long);
        assert_eq!(DistanceCategory::from_distance(2999), DistanceCategory::Long);
        assert_eq!(DistanceCategory::from_distance(3000), DistanceCategory::VeryLong);
    }

    #[test]
    fn test_labels_are_distinct() {
        let labels: std::collections::HashSet<_> =
            AgeGroup::ALL.iter().map(|g| g.label()).collect();
        assert_eq!(labels.len(), AgeGroup::ALL.len());
    }
}
