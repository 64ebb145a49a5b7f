//! Askama templates for the web frontend.

use askama::Template;

use crate::planner::Termination;
use crate::trip::TripPlan;

use super::dto::round2;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub miles_per_gallon: f64,
    pub tank_capacity_gallons: f64,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub station_count: usize,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Trip plan fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub plan: TripPlanView,
}

/// Error fragment.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Trip plan view model.
#[derive(Debug, Clone)]
pub struct TripPlanView {
    pub distance: String,
    pub duration: String,
    pub total_gallons: String,
    pub total_cost: String,
    pub stops: Vec<StopView>,
    pub trip_completed: bool,
    pub stranded_at: Option<String>,
    pub route_geometry: String,
}

impl TripPlanView {
    /// Create from a trip plan.
    pub fn from_trip(trip: &TripPlan) -> Self {
        let stranded_at = match trip.plan.termination {
            Termination::Completed => None,
            Termination::Stranded { position_miles, .. } => Some(format!("{position_miles:.0}")),
        };

        Self {
            distance: format!("{:.1}", trip.distance_miles),
            duration: format_duration(trip.duration_hours),
            total_gallons: format!("{:.1}", trip.total_gallons_needed),
            total_cost: format_dollars(trip.total_fuel_cost()),
            stops: trip
                .plan
                .stops
                .iter()
                .enumerate()
                .map(|(i, stop)| StopView {
                    number: i + 1,
                    name: stop.station_name.clone(),
                    place: format!("{}, {}", stop.city, stop.state),
                    mile: format!("{:.0}", stop.miles_from_start),
                    price: format!("${:.3}", stop.price_per_gallon),
                    gallons: format!("{:.2}", round2(stop.gallons_filled)),
                    cost: format_dollars(stop.fuel_cost),
                })
                .collect(),
            trip_completed: trip.trip_completed(),
            stranded_at,
            route_geometry: trip.route_geometry.clone(),
        }
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }
}

/// Refueling stop view model.
#[derive(Debug, Clone)]
pub struct StopView {
    pub number: usize,
    pub name: String,
    pub place: String,
    pub mile: String,
    pub price: String,
    pub gallons: String,
    pub cost: String,
}

/// Format hours as e.g. "18 h 59 min".
fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as u64;
    let (h, m) = (total_minutes / 60, total_minutes % 60);
    if h == 0 {
        format!("{m} min")
    } else {
        format!("{h} h {m} min")
    }
}

fn format_dollars(amount: f64) -> String {
    format!("${:.2}", round2(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, StationId};
    use crate::planner::{PlanResult, Stop};

    fn make_trip(termination: Termination) -> TripPlan {
        let stop = Stop {
            station_id: StationId(1),
            station_name: "PILOT #456".into(),
            city: "Tucumcari".into(),
            state: "NM".into(),
            price_per_gallon: 3.199,
            gallons_filled: 18.004,
            fuel_cost: 57.594_796,
            location: Coordinate::new(35.17, -103.72).unwrap(),
            miles_from_start: 174.6,
        };
        TripPlan {
            distance_miles: 680.04,
            duration_hours: 9.75,
            total_gallons_needed: 68.004,
            plan: PlanResult {
                total_cost: stop.fuel_cost,
                stops: vec![stop],
                termination,
            },
            route_geometry: String::new(),
        }
    }

    #[test]
    fn view_formats_values() {
        let view = TripPlanView::from_trip(&make_trip(Termination::Completed));

        assert_eq!(view.distance, "680.0");
        assert_eq!(view.duration, "9 h 45 min");
        assert_eq!(view.total_gallons, "68.0");
        assert_eq!(view.total_cost, "$57.59");
        assert!(view.has_stops());
        assert_eq!(view.stranded_at, None);

        let stop = &view.stops[0];
        assert_eq!(stop.number, 1);
        assert_eq!(stop.place, "Tucumcari, NM");
        assert_eq!(stop.mile, "175");
        assert_eq!(stop.price, "$3.199");
        assert_eq!(stop.gallons, "18.00");
    }

    #[test]
    fn stranded_view() {
        let view = TripPlanView::from_trip(&make_trip(Termination::Stranded {
            position_miles: 420.4,
            fuel_remaining: 8.0,
        }));

        assert!(!view.trip_completed);
        assert_eq!(view.stranded_at.as_deref(), Some("420"));
    }

    #[test]
    fn short_durations_omit_hours() {
        assert_eq!(format_duration(0.5), "30 min");
        assert_eq!(format_duration(2.0), "2 h 0 min");
    }

    #[test]
    fn results_fragment_renders() {
        let html = PlanResultsTemplate {
            plan: TripPlanView::from_trip(&make_trip(Termination::Completed)),
        }
        .render()
        .unwrap();

        assert!(html.contains("PILOT #456"));
        assert!(html.contains("$57.59"));
    }
}
