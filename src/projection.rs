// Copyright (c) 2025-2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `projection` module projects a fix position from a station along
//! a true bearing and distance, e.g. a waypoint defined by a VOR radial
//! and range.
//!
//! Every projection is verified by an inverse calculation; a projection
//! whose verified distance misses the requested distance is recalculated
//! in equal constant-bearing steps, which bounds the error accumulated
//! over very long paths.

use crate::geodesy::Geodesy;
use crate::{Bearing, Error, GeoPoint};
use icao_units::non_si::NauticalMiles;
use icao_units::si::Metres;
use log::debug;

/// The maximum difference between the requested distance and the
/// inverse-verified distance of a single-step projection.
pub const VERIFICATION_TOLERANCE: Metres = Metres(0.1);

/// The path length per projection step when a projection is subdivided.
pub const STEP_LENGTH: NauticalMiles = NauticalMiles(500.0);

/// Project a position along a geodesic at a true bearing and distance.
///
/// Performs a single `direct` calculation and verifies its distance with
/// an `inverse` calculation. If the verified distance is not within
/// [`VERIFICATION_TOLERANCE`] of the requested distance, the path is
/// subdivided into one step per whole [`STEP_LENGTH`] and walked at a
/// constant bearing, each destination seeding the next step.
/// * `geodesy` - the geodesy capability.
/// * `origin` - the station position.
/// * `bearing` - the true bearing from the station.
/// * `distance` - the distance from the station, must be positive.
///
/// returns the projected position.
///
/// # Errors
///
/// `Error::InvalidDistance` if `distance` is zero or negative.
pub fn project<G: Geodesy>(
    geodesy: &G,
    origin: &GeoPoint,
    bearing: Bearing,
    distance: NauticalMiles,
) -> Result<GeoPoint, Error> {
    if distance.0 <= 0.0 {
        return Err(Error::InvalidDistance(distance.0));
    }

    let distance_m = Metres::from(distance);
    let destination = geodesy.direct(origin, bearing.degrees(), distance_m);

    let verification = geodesy.inverse(origin, &destination);
    let error_m = (verification.distance.0 - distance_m.0).abs();
    if error_m <= VERIFICATION_TOLERANCE.0 {
        return Ok(destination);
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_steps = ((distance.0 / STEP_LENGTH.0).floor() as u32).max(1);
    debug!(
        "projection of {} NM verified {error_m:.3} m off, walking {num_steps} steps",
        distance.0
    );

    let step = Metres(distance_m.0 / f64::from(num_steps));
    let mut position = *origin;
    for _ in 0..num_steps {
        position = geodesy.direct(&position, bearing.degrees(), step);
    }

    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::{InverseSolution, Wgs84Geodesy};
    use angle_sc::{is_within_tolerance, Degrees};

    #[test]
    fn test_invalid_distance() {
        let geodesy = Wgs84Geodesy;
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let bearing = Bearing::new(Degrees(90.0)).expect("valid bearing");

        assert_eq!(
            Err(Error::InvalidDistance(0.0)),
            project(&geodesy, &origin, bearing, NauticalMiles(0.0))
        );
        assert_eq!(
            Err(Error::InvalidDistance(-10.0)),
            project(&geodesy, &origin, bearing, NauticalMiles(-10.0))
        );
    }

    #[test]
    fn test_project_cardinal_directions() {
        let geodesy = Wgs84Geodesy;
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let distance = NauticalMiles(100.0);

        let north = Bearing::new(Degrees(0.0)).expect("valid bearing");
        let point = project(&geodesy, &origin, north, distance).expect("valid projection");
        assert!(point.lat().0 > origin.lat().0);

        let east = Bearing::new(Degrees(90.0)).expect("valid bearing");
        let point = project(&geodesy, &origin, east, distance).expect("valid projection");
        assert!(point.lon().0 > origin.lon().0);

        let verification = geodesy.inverse(&origin, &point);
        assert!(is_within_tolerance(
            Metres::from(distance).0,
            verification.distance.0,
            1e-3
        ));
    }

    /// A lossy oracle whose `direct` calculation falls short by an error
    /// growing quadratically with distance, to force the stepwise path.
    struct TruncatingGeodesy;

    impl Geodesy for TruncatingGeodesy {
        fn inverse(&self, a: &GeoPoint, b: &GeoPoint) -> InverseSolution {
            Wgs84Geodesy.inverse(a, b)
        }

        fn direct(&self, a: &GeoPoint, azimuth: Degrees, distance: Metres) -> GeoPoint {
            let shortfall = (distance.0 / 1.0e6).powi(2);
            Wgs84Geodesy.direct(a, azimuth, Metres(distance.0 - shortfall))
        }
    }

    #[test]
    fn test_multi_step_refinement() {
        let origin = GeoPoint::new(Degrees(0.0), Degrees(0.0)).expect("valid point");
        // along a meridian the azimuth never drifts, so the stepwise
        // path retraces the single geodesic
        let bearing = Bearing::new(Degrees(0.0)).expect("valid bearing");
        let distance = NauticalMiles(2000.0);
        let distance_m = Metres::from(distance);

        let lossy = TruncatingGeodesy;
        let single = lossy.direct(&origin, bearing.degrees(), distance_m);
        let single_error = (lossy.inverse(&origin, &single).distance.0 - distance_m.0).abs();
        assert!(single_error > VERIFICATION_TOLERANCE.0);

        // four 500 NM steps accumulate less truncation than one long step
        let stepped = project(&lossy, &origin, bearing, distance).expect("valid projection");
        let stepped_error = (lossy.inverse(&origin, &stepped).distance.0 - distance_m.0).abs();
        assert!(stepped_error < single_error);
    }
}
