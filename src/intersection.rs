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

//! The `intersection` module finds the position where a bearing ray from
//! one station crosses a distance circle around a second station, e.g. a
//! fix defined by a radial from a VOR and a range from a separate DME.
//!
//! There is no closed form for the intersection of a geodesic and a
//! distance circle on an ellipsoid, so the position is found by root
//! finding on the signed distance error along the ray:
//!
//! `f(t) = |point_at(t) to reference| - target`
//!
//! where `t` is the arc length along the ray from the origin. `f` is
//! continuous but not monotonic beyond the point of closest approach to
//! the reference, so the initial bracket is seeded around the expected
//! crossing and the search tracks the best position it has evaluated,
//! which it returns even when the tolerance cannot be met, e.g. when the
//! ray only grazes or never reaches the distance circle. Callers decide
//! fitness for use from the returned [`SearchState`] and distance error.

use crate::geodesy::Geodesy;
use crate::{Bearing, Error, GeoPoint};
use icao_units::non_si::NauticalMiles;
use icao_units::si::Metres;
use log::{debug, trace};

/// The bound on the number of search iterations.
pub const MAX_ITERATIONS: u32 = 200;

/// The distance error below which a position is converged.
pub const DISTANCE_TOLERANCE: Metres = Metres(1.0);

/// An improvement of the best error below a tenth of the tolerance
/// counts as a stagnant iteration.
const STAGNATION_IMPROVEMENT: Metres = Metres(0.1);

/// The number of consecutive stagnant iterations before a secant
/// correction is attempted.
const STAGNATION_LIMIT: u32 = 5;

/// The bracket width below which further narrowing is pointless,
/// around a millimetre of arc length.
const MIN_BRACKET_WIDTH: NauticalMiles = NauticalMiles(1e-6);

/// Targets below ~100 m use a fixed sub-100-m scale bracket, where float
/// precision in degrees otherwise dominates the error budget.
const SHORT_TARGET: NauticalMiles = NauticalMiles(0.05);

/// The upper bound of the short-target bracket.
const SHORT_BRACKET_MAX: NauticalMiles = NauticalMiles(0.2);

/// Targets below half a mile use a bracket clamped near the origin.
const NEAR_TARGET: NauticalMiles = NauticalMiles(0.5);

/// The margin added around the triangle-inequality bracket.
const BRACKET_MARGIN: NauticalMiles = NauticalMiles(1.0);

/// A radial/distance intersection problem: the position on `bearing`
/// from `origin` at `target_distance` from `reference`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionQuery {
    /// The station the bearing ray emanates from.
    pub origin: GeoPoint,
    /// The true bearing of the ray.
    pub bearing: Bearing,
    /// The station the target distance is measured from.
    pub reference: GeoPoint,
    /// The required distance from `reference`.
    pub target_distance: NauticalMiles,
}

impl IntersectionQuery {
    /// Construct an `IntersectionQuery`.
    /// * `origin` - the station the bearing ray emanates from.
    /// * `bearing` - the true bearing of the ray.
    /// * `reference` - the station the target distance is measured from.
    /// * `target_distance` - the required distance, must be positive.
    ///
    /// # Errors
    ///
    /// `Error::InvalidDistance` if `target_distance` is zero or negative.
    pub fn new(
        origin: GeoPoint,
        bearing: Bearing,
        reference: GeoPoint,
        target_distance: NauticalMiles,
    ) -> Result<Self, Error> {
        if target_distance.0 <= 0.0 {
            Err(Error::InvalidDistance(target_distance.0))
        } else {
            Ok(Self {
                origin,
                bearing,
                reference,
                target_distance,
            })
        }
    }
}

/// The state of the intersection search.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchState {
    /// Bisecting the bracket; the terminal state when the iteration
    /// bound was reached while the error was still improving.
    Searching,
    /// The best error stopped improving and a secant correction was
    /// applied; the terminal state when the iteration bound was reached
    /// while stagnant.
    Stagnant,
    /// The best error is within [`DISTANCE_TOLERANCE`].
    Converged,
    /// The bracket collapsed below [`MIN_BRACKET_WIDTH`] before the
    /// tolerance was met, e.g. at a tangency of ray and circle.
    BoundsExhausted,
}

/// The solution of an intersection search: the best position evaluated,
/// never a worse but more recent one.
///
/// An unconverged search is not an error; the caller inspects
/// `distance_error` and `state` to judge fitness for use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionSolution {
    /// The best position found.
    pub point: GeoPoint,
    /// The absolute distance error of `point` from the target distance.
    pub distance_error: Metres,
    /// The number of search iterations performed.
    pub iterations: u32,
    /// The state the search terminated in.
    pub state: SearchState,
}

impl IntersectionSolution {
    /// Whether the search met [`DISTANCE_TOLERANCE`].
    #[must_use]
    pub fn converged(&self) -> bool {
        self.state == SearchState::Converged
    }
}

/// One evaluation of the ray: the position at `t` Nautical Miles from
/// the origin and its signed distance error, negative inside the circle.
#[derive(Clone, Copy)]
struct Sample {
    t: f64,
    point: GeoPoint,
    error: f64,
}

/// Seed the search bracket, in Nautical Miles along the ray.
///
/// Small targets are searched near the origin, the usual arrangement
/// when the radial and the distance are referenced to stations at the
/// same site; those brackets only apply when the reference itself lies
/// within them, since otherwise they could not straddle the distance
/// circle. All other queries bracket the crossing implied by the
/// triangle inequality, with a margin on each side.
///
/// # Errors
///
/// `Error::InvalidSearchRange` if the fallback bracket is degenerate.
fn initial_bracket(separation: NauticalMiles, target: NauticalMiles) -> Result<(f64, f64), Error> {
    let fallback_max = (2.0 * target.0).max(1.0);
    let (min, max) = if target.0 < SHORT_TARGET.0 && separation.0 <= SHORT_BRACKET_MAX.0 {
        (0.0, SHORT_BRACKET_MAX.0)
    } else if target.0 < NEAR_TARGET.0 && separation.0 <= fallback_max {
        (0.0, fallback_max)
    } else {
        (
            (separation.0 - target.0 - BRACKET_MARGIN.0).max(0.0),
            separation.0 + target.0 + BRACKET_MARGIN.0,
        )
    };

    // a degenerate bracket falls back to the near-origin range
    let (min, max) = if min < max { (min, max) } else { (0.0, fallback_max) };
    if min < max {
        Ok((min, max))
    } else {
        Err(Error::InvalidSearchRange { min, max })
    }
}

fn evaluate<G: Geodesy>(geodesy: &G, query: &IntersectionQuery, target_m: f64, t: f64) -> Sample {
    let point = geodesy.direct(
        &query.origin,
        query.bearing.degrees(),
        Metres::from(NauticalMiles(t)),
    );
    let distance = geodesy.inverse(&point, &query.reference).distance;
    Sample {
        t,
        point,
        error: distance.0 - target_m,
    }
}

/// One secant step through the signed errors at the bracket endpoints,
/// for when bisection has stopped making progress, e.g. where the error
/// flattens near the point of closest approach.
///
/// Returns the narrowed bracket: toward the secant crossing when it
/// falls inside the current bracket, otherwise the crossing is judged
/// unreliable and the bracket shrinks by a third from each side.
fn secant_correction<G: Geodesy>(
    geodesy: &G,
    query: &IntersectionQuery,
    target_m: f64,
    min: f64,
    max: f64,
    best: &mut Sample,
) -> (f64, f64) {
    let low = evaluate(geodesy, query, target_m, min);
    let high = evaluate(geodesy, query, target_m, max);
    if low.error.abs() < best.error.abs() {
        *best = low;
    }
    if high.error.abs() < best.error.abs() {
        *best = high;
    }

    let gradient = high.error - low.error;
    let crossing = if gradient.abs() < f64::EPSILON {
        f64::NAN
    } else {
        low.error.mul_add(-(max - min) / gradient, min)
    };

    if (min..=max).contains(&crossing) {
        let corrected = evaluate(geodesy, query, target_m, crossing);
        trace!(
            "secant correction at {crossing:.6} NM, error {:.3} m",
            corrected.error
        );
        if corrected.error.abs() < best.error.abs() {
            *best = corrected;
        }
        if corrected.error > 0.0 {
            (min, crossing)
        } else {
            (crossing, max)
        }
    } else {
        let shrink = (max - min) / 3.0;
        (min + shrink, max - shrink)
    }
}

/// Find the position on the bearing ray from `query.origin` at
/// `query.target_distance` from `query.reference`.
///
/// Bisects the bracket from [`initial_bracket`], always keeping the best
/// position evaluated so far. A search that stops improving by more than
/// a tenth of [`DISTANCE_TOLERANCE`] for [`STAGNATION_LIMIT`] iterations
/// applies a secant correction through the bracket endpoint errors. The
/// search stops when the best error is within [`DISTANCE_TOLERANCE`],
/// the bracket collapses below [`MIN_BRACKET_WIDTH`], or after
/// [`MAX_ITERATIONS`] evaluations.
/// * `geodesy` - the geodesy capability.
/// * `query` - the intersection problem.
///
/// returns the best position evaluated, with its error, the number of
/// evaluations and the terminal [`SearchState`].
///
/// # Errors
///
/// `Error::InvalidSearchRange` if the search bracket is degenerate.
pub fn solve_intersection<G: Geodesy>(
    geodesy: &G,
    query: &IntersectionQuery,
) -> Result<IntersectionSolution, Error> {
    let target_m = Metres::from(query.target_distance).0;
    let separation = NauticalMiles::from(geodesy.inverse(&query.origin, &query.reference).distance);
    let (mut min, mut max) = initial_bracket(separation, query.target_distance)?;
    debug!(
        "searching {min:.6}..{max:.6} NM for {} NM from the reference",
        query.target_distance.0
    );

    let mut current = evaluate(geodesy, query, target_m, f64::midpoint(min, max));
    let mut best = current;
    let mut previous_error = f64::INFINITY;
    let mut stagnant_count = 0;
    let mut iterations: u32 = 1;
    let mut state = SearchState::Searching;

    loop {
        if best.error.abs() < DISTANCE_TOLERANCE.0 {
            state = SearchState::Converged;
            break;
        }
        if iterations >= MAX_ITERATIONS {
            break;
        }

        if previous_error - best.error.abs() < STAGNATION_IMPROVEMENT.0 {
            stagnant_count += 1;
        } else {
            stagnant_count = 0;
        }
        previous_error = best.error.abs();

        if stagnant_count >= STAGNATION_LIMIT {
            state = SearchState::Stagnant;
            stagnant_count = 0;
            (min, max) = secant_correction(geodesy, query, target_m, min, max, &mut best);
        } else if current.error > 0.0 {
            // the sample overshot the circle: the crossing is nearer the
            // origin
            state = SearchState::Searching;
            max = current.t;
        } else {
            state = SearchState::Searching;
            min = current.t;
        }

        if (max - min) < MIN_BRACKET_WIDTH.0 {
            state = SearchState::BoundsExhausted;
            break;
        }

        current = evaluate(geodesy, query, target_m, f64::midpoint(min, max));
        iterations += 1;
        trace!(
            "iteration {iterations}: t {:.6} NM, error {:.3} m",
            current.t,
            current.error
        );
        if current.error.abs() < best.error.abs() {
            best = current;
        }
    }

    debug!(
        "search ended {state:?} after {iterations} iterations, error {:.3} m",
        best.error.abs()
    );

    Ok(IntersectionSolution {
        point: best.point,
        distance_error: Metres(best.error.abs()),
        iterations,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::Wgs84Geodesy;
    use angle_sc::{is_within_tolerance, Degrees};

    #[test]
    fn test_query_validation() {
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let bearing = Bearing::new(Degrees(90.0)).expect("valid bearing");

        assert_eq!(
            Err(Error::InvalidDistance(0.0)),
            IntersectionQuery::new(origin, bearing, origin, NauticalMiles(0.0))
        );
        assert_eq!(
            Err(Error::InvalidDistance(-0.3)),
            IntersectionQuery::new(origin, bearing, origin, NauticalMiles(-0.3))
        );
        assert!(IntersectionQuery::new(origin, bearing, origin, NauticalMiles(0.3)).is_ok());
    }

    #[test]
    fn test_initial_bracket_policy() {
        // sub-100-m target with the reference at the origin site
        let bracket = initial_bracket(NauticalMiles(0.1), NauticalMiles(0.03))
            .expect("valid bracket");
        assert_eq!((0.0, 0.2), bracket);

        // short target with the reference at the origin site
        let bracket = initial_bracket(NauticalMiles(0.3), NauticalMiles(0.3))
            .expect("valid bracket");
        assert_eq!((0.0, 1.0), bracket);

        // short target with a distant reference brackets the crossing
        let (min, max) = initial_bracket(NauticalMiles(4.245), NauticalMiles(0.3))
            .expect("valid bracket");
        assert!(is_within_tolerance(2.945, min, 1e-12));
        assert!(is_within_tolerance(5.545, max, 1e-12));

        // reference coincident with the origin
        let bracket = initial_bracket(NauticalMiles(0.0), NauticalMiles(10.0))
            .expect("valid bracket");
        assert_eq!((0.0, 11.0), bracket);

        let bracket = initial_bracket(NauticalMiles(50.0), NauticalMiles(10.0))
            .expect("valid bracket");
        assert_eq!((39.0, 61.0), bracket);
    }

    #[test]
    fn test_intersection_along_meridian() {
        let geodesy = Wgs84Geodesy;
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let reference = GeoPoint::new(Degrees(46.0), Degrees(-75.0)).expect("valid point");
        let bearing = Bearing::new(Degrees(0.0)).expect("valid bearing");
        let query = IntersectionQuery::new(origin, bearing, reference, NauticalMiles(10.0))
            .expect("valid query");

        let solution = solve_intersection(&geodesy, &query).expect("valid solution");
        assert!(solution.converged());
        assert!(solution.distance_error.0 < DISTANCE_TOLERANCE.0);
        assert!(solution.iterations <= MAX_ITERATIONS);

        let distance = geodesy.inverse(&solution.point, &reference).distance;
        assert!(is_within_tolerance(
            Metres::from(NauticalMiles(10.0)).0,
            distance.0,
            DISTANCE_TOLERANCE.0
        ));
    }

    #[test]
    fn test_reference_coincident_with_origin() {
        let geodesy = Wgs84Geodesy;
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let bearing = Bearing::new(Degrees(135.0)).expect("valid bearing");
        let query = IntersectionQuery::new(origin, bearing, origin, NauticalMiles(10.0))
            .expect("valid query");

        let solution = solve_intersection(&geodesy, &query).expect("valid solution");
        assert!(solution.converged());

        let distance = geodesy.inverse(&solution.point, &origin).distance;
        assert!(is_within_tolerance(18520.0, distance.0, DISTANCE_TOLERANCE.0));
    }

    #[test]
    fn test_short_target_near_station() {
        let geodesy = Wgs84Geodesy;
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let bearing = Bearing::new(Degrees(90.0)).expect("valid bearing");
        let query = IntersectionQuery::new(origin, bearing, origin, NauticalMiles(0.03))
            .expect("valid query");

        let solution = solve_intersection(&geodesy, &query).expect("valid solution");
        assert!(solution.converged());

        let distance = geodesy.inverse(&solution.point, &origin).distance;
        assert!(is_within_tolerance(55.56, distance.0, DISTANCE_TOLERANCE.0));
    }

    #[test]
    fn test_diverging_ray_terminates() {
        let geodesy = Wgs84Geodesy;
        let origin = GeoPoint::new(Degrees(45.0), Degrees(-75.0)).expect("valid point");
        let reference = GeoPoint::new(Degrees(45.0), Degrees(-74.0)).expect("valid point");
        // due West, away from the reference: no crossing exists
        let bearing = Bearing::new(Degrees(270.0)).expect("valid bearing");
        let query = IntersectionQuery::new(origin, bearing, reference, NauticalMiles(10.0))
            .expect("valid query");

        let solution = solve_intersection(&geodesy, &query).expect("valid solution");
        assert!(!solution.converged());
        assert!(solution.iterations <= MAX_ITERATIONS);
        assert!(solution.distance_error.0 > DISTANCE_TOLERANCE.0);

        // the best approximation is no worse than the far bracket edge
        let far_error = 158_903.0;
        assert!(solution.distance_error.0 < far_error);
    }
}
