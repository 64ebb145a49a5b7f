//! Vehicle profile for the stop planner.

/// Default fuel economy in miles per gallon.
pub const DEFAULT_MILES_PER_GALLON: f64 = 10.0;

/// Default tank capacity in gallons.
pub const DEFAULT_TANK_CAPACITY_GALLONS: f64 = 50.0;

/// Default maximum distance between a station and the route, in miles.
pub const DEFAULT_CORRIDOR_THRESHOLD_MILES: f64 = 20.0;

/// Error returned when a vehicle profile parameter is unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid vehicle profile: {field} must be positive and finite (got {value})")]
pub struct InvalidProfile {
    field: &'static str,
    value: f64,
}

/// Parameters of the vehicle and the station corridor.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProfile {
    /// Fuel economy (miles per gallon).
    pub miles_per_gallon: f64,

    /// Usable tank size (gallons). The vehicle starts every trip full.
    pub tank_capacity_gallons: f64,

    /// Stations farther than this from every route point are ignored (miles).
    pub corridor_threshold_miles: f64,
}

impl VehicleProfile {
    /// Create a profile, rejecting zero, negative or non-finite values.
    pub fn new(
        miles_per_gallon: f64,
        tank_capacity_gallons: f64,
        corridor_threshold_miles: f64,
    ) -> Result<Self, InvalidProfile> {
        for (field, value) in [
            ("miles_per_gallon", miles_per_gallon),
            ("tank_capacity_gallons", tank_capacity_gallons),
            ("corridor_threshold_miles", corridor_threshold_miles),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InvalidProfile { field, value });
            }
        }

        Ok(Self {
            miles_per_gallon,
            tank_capacity_gallons,
            corridor_threshold_miles,
        })
    }

    /// Distance travelable on a full tank.
    pub fn max_range_miles(&self) -> f64 {
        self.miles_per_gallon * self.tank_capacity_gallons
    }

    /// Gallons burned over `miles`.
    pub fn gallons_for(&self, miles: f64) -> f64 {
        miles / self.miles_per_gallon
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            miles_per_gallon: DEFAULT_MILES_PER_GALLON,
            tank_capacity_gallons: DEFAULT_TANK_CAPACITY_GALLONS,
            corridor_threshold_miles: DEFAULT_CORRIDOR_THRESHOLD_MILES,
        }
    }
}
