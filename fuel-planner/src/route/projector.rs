//! Distance-indexed route projection.

use crate::domain::Coordinate;

/// Error returned when a route cannot be projected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route: {reason}")]
pub struct InvalidRoute {
    reason: &'static str,
}

/// A point on a projected route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutePoint {
    pub location: Coordinate,
    /// Distance travelled along the route up to this point, in miles.
    pub cumulative_distance_miles: f64,
}

/// An ordered route with cumulative distances.
///
/// Distances are the running sum of haversine distances between consecutive
/// raw points, so they are a piecewise-linear approximation of the path.
/// The first point is always at 0 miles and distances never decrease.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRoute {
    points: Vec<RoutePoint>,
}

impl ProjectedRoute {
    /// Project an ordered coordinate sequence onto cumulative distance.
    ///
    /// Fails if `coords` is empty. A single coordinate yields a route of
    /// zero length.
    pub fn project(coords: &[Coordinate]) -> Result<Self, InvalidRoute> {
        let Some(first) = coords.first() else {
            return Err(InvalidRoute {
                reason: "route must contain at least one point",
            });
        };

        let mut points = Vec::with_capacity(coords.len());
        points.push(RoutePoint {
            location: *first,
            cumulative_distance_miles: 0.0,
        });

        let mut cumulative = 0.0;
        for pair in coords.windows(2) {
            cumulative += pair[0].haversine_miles(&pair[1]);
            points.push(RoutePoint {
                location: pair[1],
                cumulative_distance_miles: cumulative,
            });
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// Total projected length in miles.
    pub fn total_miles(&self) -> f64 {
        // Non-empty by construction.
        self.points
            .last()
            .map_or(0.0, |p| p.cumulative_distance_miles)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a projected route has at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    #[test]
    fn empty_route_is_rejected() {
        let err = ProjectedRoute::project(&[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid route: route must contain at least one point"
        );
    }

    #[test]
    fn single_point_has_zero_length() {
        let route = ProjectedRoute::project(&[coord(36.1, -115.1)]).unwrap();
        assert_eq!(route.len(), 1);
        assert_eq!(route.total_miles(), 0.0);
        assert_eq!(route.points()[0].cumulative_distance_miles, 0.0);
    }

    #[test]
    fn accumulates_segment_distances() {
        let a = coord(40.0, -100.0);
        let b = coord(41.0, -100.0);
        let c = coord(41.0, -99.0);
        let route = ProjectedRoute::project(&[a, b, c]).unwrap();

        let ab = a.haversine_miles(&b);
        let bc = b.haversine_miles(&c);
        let points = route.points();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].cumulative_distance_miles, 0.0);
        assert!((points[1].cumulative_distance_miles - ab).abs() < 1e-9);
        assert!((points[2].cumulative_distance_miles - (ab + bc)).abs() < 1e-9);
        assert_eq!(points[2].location, c);
    }

    #[test]
    fn repeated_points_add_no_distance() {
        let a = coord(40.0, -100.0);
        let route = ProjectedRoute::project(&[a, a, a]).unwrap();
        assert!(route.points().iter().all(|p| p.cumulative_distance_miles == 0.0));
    }

    fn arb_coord() -> impl Strategy<Value = Coordinate> {
        (-80.0f64..80.0, -179.0f64..179.0).prop_map(|(lat, lon)| coord(lat, lon))
    }

    proptest! {
        #[test]
        fn cumulative_distance_is_monotonic(coords in prop::collection::vec(arb_coord(), 1..60)) {
            let route = ProjectedRoute::project(&coords).unwrap();

            prop_assert_eq!(route.len(), coords.len());
            prop_assert_eq!(route.points()[0].cumulative_distance_miles, 0.0);
            for window in route.points().windows(2) {
                prop_assert!(
                    window[0].cumulative_distance_miles <= window[1].cumulative_distance_miles,
                    "distance decreased: {:?} -> {:?}",
                    window[0],
                    window[1]
                );
            }
        }
    }
}
