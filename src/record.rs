//! The passenger record and the fixed list of rated services.

use serde::Serialize;

use crate::analyzers::buckets::{AgeGroup, DistanceCategory};

/// Satisfaction token that counts as "satisfied" (compared case-insensitively).
pub const SATISFIED: &str = "satisfied";

/// Number of rated services on every record.
pub const SERVICE_COUNT: usize = 14;

/// The 14 rated services, in source column order.
///
/// Declaration order is significant: rankings break ties by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Service {
    InflightWifi,
    TimeConvenience,
    OnlineBooking,
    GateLocation,
    FoodAndDrink,
    OnlineBoarding,
    SeatComfort,
    InflightEntertainment,
    OnboardService,
    LegRoom,
    BaggageHandling,
    Checkin,
    InflightService,
    Cleanliness,
}

impl Service {
    pub const ALL: [Service; SERVICE_COUNT] = [
        Service::InflightWifi,
        Service::TimeConvenience,
        Service::OnlineBooking,
        Service::GateLocation,
        Service::FoodAndDrink,
        Service::OnlineBoarding,
        Service::SeatComfort,
        Service::InflightEntertainment,
        Service::OnboardService,
        Service::LegRoom,
        Service::BaggageHandling,
        Service::Checkin,
        Service::InflightService,
        Service::Cleanliness,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Service::InflightWifi => "Inflight Wifi Service",
            Service::TimeConvenience => "Departure/Arrival Time Convenient",
            Service::OnlineBooking => "Ease of Online Booking",
            Service::GateLocation => "Gate Location",
            Service::FoodAndDrink => "Food and Drink",
            Service::OnlineBoarding => "Online Boarding",
            Service::SeatComfort => "Seat Comfort",
            Service::InflightEntertainment => "Inflight Entertainment",
            Service::OnboardService => "On-board Service",
            Service::LegRoom => "Leg Room Service",
            Service::BaggageHandling => "Baggage Handling",
            Service::Checkin => "Check-in Service",
            Service::InflightService => "Inflight Service",
            Service::Cleanliness => "Cleanliness",
        }
    }

    /// Position of this service in [`Service::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One passenger/flight observation.
///
/// Records are built by the loader and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassengerRecord {
    pub row_index: Option<u64>,
    pub id: String,

    // categorical
    pub gender: String,
    pub customer_type: String,
    pub type_of_travel: String,
    pub travel_class: String,
    pub satisfaction: String,

    // numeric
    pub age: u32,
    pub flight_distance: u32,
    pub ratings: [u32; SERVICE_COUNT],
    pub departure_delay_minutes: f64,
    pub arrival_delay_minutes: f64,

    /// Opaque date token, only ever compared for equality.
    pub flight_date: Option<String>,
}

impl PassengerRecord {
    pub fn rating(&self, service: Service) -> u32 {
        self.ratings[service.index()]
    }

    /// Mean of the 14 service ratings. Always divides by 14.
    pub fn average_service_rating(&self) -> f64 {
        let total: u64 = self.ratings.iter().map(|&r| u64::from(r)).sum();
        total as f64 / SERVICE_COUNT as f64
    }

    pub fn is_satisfied(&self) -> bool {
        self.satisfaction.eq_ignore_ascii_case(SATISFIED)
    }

    pub fn age_group(&self) -> AgeGroup {
        AgeGroup::from_age(self.age)
    }

    pub fn distance_category(&self) -> DistanceCategory {
        DistanceCategory::from_distance(self.flight_distance)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a record with neutral defaults; tests override what they need.
    pub(crate) fn record(id: &str) -> PassengerRecord {
        PassengerRecord {
            row_index: None,
            id: id.to_string(),
            gender: "Female".to_string(),
            customer_type: "Loyal Customer".to_string(),
            type_of_travel: "Business travel".to_string(),
            travel_class: "Eco".to_string(),
            satisfaction: "neutral or dissatisfied".to_string(),
            age: 40,
            flight_distance: 1000,
            ratings: [3; SERVICE_COUNT],
            departure_delay_minutes: 0.0,
            arrival_delay_minutes: 0.0,
            flight_date: None,
        }
    }

    #[test]
    fn test_average_service_rating_divides_by_fourteen() {
        let mut r = record("1");
        r.ratings = [0; SERVICE_COUNT];
        r.ratings[0] = 14;
        assert_eq!(r.average_service_rating(), 1.0);
    }

    #[test]
    fn test_is_satisfied_ignores_case() {
        let mut r = record("1");
        r.satisfaction = "Satisfied".to_string();
        assert!(r.is_satisfied());

        r.satisfaction = "neutral or dissatisfied".to_string();
        assert!(!r.is_satisfied());

        r.satisfaction = "dissatisfied".to_string();
        assert!(!r.is_satisfied());
    }

    #[test]
    fn test_service_index_matches_declaration_order() {
        for (i, service) in Service::ALL.iter().enumerate() {
            assert_eq!(service.index(), i);
        }
        assert_eq!(Service::Cleanliness.label(), "Cleanliness");
    }

    #[test]
    fn test_rating_lookup() {
        let mut r = record("1");
        r.ratings[Service::SeatComfort.index()] = 5;
        assert_eq!(r.rating(Service::SeatComfort), 5);
        assert_eq!(r.rating(Service::LegRoom), 3);
    }
}
