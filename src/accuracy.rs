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

//! The `accuracy` module validates computed fix positions by round-trip:
//! an inverse calculation from the station to the computed position
//! gives the actual distance and azimuth, which are compared against the
//! requested values. Batches of calculations can be summarized with
//! [`calculate_precision_metrics`].

use crate::geodesy::Geodesy;
use crate::{Bearing, GeoPoint};
use angle_sc::Degrees;
use icao_units::non_si::NauticalMiles;
use icao_units::si::Metres;

/// The qualitative rating of a fix calculation, from best to worst.
///
/// A rating requires both its distance bound and its azimuth bound to
/// hold.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum Rating {
    /// Distance error <= 1 m and azimuth error <= 0.001 degrees.
    Excellent,
    /// Distance error <= 5 m and azimuth error <= 0.01 degrees.
    VeryGood,
    /// Distance error <= 10 m and azimuth error <= 0.1 degrees.
    Good,
    /// Distance error <= 50 m and azimuth error <= 1.0 degrees.
    Acceptable,
    /// Outside every other tier.
    Poor,
}

impl Rating {
    /// Rate a pair of round-trip errors.
    /// * `distance_error` - the absolute distance error.
    /// * `azimuth_error` - the absolute azimuth error.
    #[must_use]
    pub fn from_errors(distance_error: Metres, azimuth_error: Degrees) -> Self {
        let distance = distance_error.0.abs();
        let azimuth = azimuth_error.0.abs();
        if distance <= 1.0 && azimuth <= 0.001 {
            Self::Excellent
        } else if distance <= 5.0 && azimuth <= 0.01 {
            Self::VeryGood
        } else if distance <= 10.0 && azimuth <= 0.1 {
            Self::Good
        } else if distance <= 50.0 && azimuth <= 1.0 {
            Self::Acceptable
        } else {
            Self::Poor
        }
    }
}

/// The round-trip errors of a fix calculation and their [`Rating`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccuracyReport {
    /// The absolute distance error, in metres.
    pub distance_error: Metres,
    /// The absolute azimuth error, as the shortest angular distance.
    pub azimuth_error: Degrees,
    /// The qualitative rating of the errors.
    pub rating: Rating,
}

/// Validate a computed position against the bearing and distance that
/// defined it.
///
/// One inverse calculation from `start` to `end` gives the actual
/// distance and azimuth. Azimuths are compared on [0, 360) and the error
/// is the shortest angular distance, so an expected bearing of 359.9 and
/// an actual azimuth of 0.1 differ by 0.2 degrees, not 359.8.
/// * `geodesy` - the geodesy capability.
/// * `start` - the station position.
/// * `end` - the computed position.
/// * `expected_bearing` - the bearing that defined `end`.
/// * `expected_distance` - the distance that defined `end`.
#[must_use]
pub fn validate<G: Geodesy>(
    geodesy: &G,
    start: &GeoPoint,
    end: &GeoPoint,
    expected_bearing: Bearing,
    expected_distance: NauticalMiles,
) -> AccuracyReport {
    let solution = geodesy.inverse(start, end);
    let distance_error = Metres((solution.distance.0 - Metres::from(expected_distance).0).abs());

    let actual = solution.azimuth.0.rem_euclid(360.0);
    let expected = expected_bearing.degrees().0.rem_euclid(360.0);
    let difference = (actual - expected).abs();
    let azimuth_error = Degrees(difference.min(360.0 - difference));

    AccuracyReport {
        distance_error,
        azimuth_error,
        rating: Rating::from_errors(distance_error, azimuth_error),
    }
}

/// The error statistics of a batch of fix calculations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrecisionMetrics {
    /// The mean absolute distance error.
    pub mean_distance_error: Metres,
    /// The largest absolute distance error.
    pub max_distance_error: Metres,
    /// The smallest absolute distance error.
    pub min_distance_error: Metres,
    /// The mean absolute azimuth error.
    pub mean_azimuth_error: Degrees,
    /// The largest absolute azimuth error.
    pub max_azimuth_error: Degrees,
    /// The smallest absolute azimuth error.
    pub min_azimuth_error: Degrees,
    /// The number of calculations in the batch.
    pub count: usize,
}

impl Default for PrecisionMetrics {
    /// All-zero statistics, the metrics of an empty batch.
    fn default() -> Self {
        Self {
            mean_distance_error: Metres(0.0),
            max_distance_error: Metres(0.0),
            min_distance_error: Metres(0.0),
            mean_azimuth_error: Degrees(0.0),
            max_azimuth_error: Degrees(0.0),
            min_azimuth_error: Degrees(0.0),
            count: 0,
        }
    }
}

/// Summarize the round-trip errors of a batch of fix calculations.
///
/// Each entry is validated as by [`validate`] and the absolute errors
/// are aggregated. An empty batch yields all-zero statistics.
/// * `geodesy` - the geodesy capability.
/// * `calculations` - `(start, end, bearing, distance)` per calculation.
#[must_use]
pub fn calculate_precision_metrics<G: Geodesy>(
    geodesy: &G,
    calculations: &[(GeoPoint, GeoPoint, Bearing, NauticalMiles)],
) -> PrecisionMetrics {
    if calculations.is_empty() {
        return PrecisionMetrics::default();
    }

    let mut distance_sum = 0.0;
    let mut distance_max = f64::NEG_INFINITY;
    let mut distance_min = f64::INFINITY;
    let mut azimuth_sum = 0.0;
    let mut azimuth_max = f64::NEG_INFINITY;
    let mut azimuth_min = f64::INFINITY;

    for (start, end, bearing, distance) in calculations {
        let report = validate(geodesy, start, end, *bearing, *distance);
        distance_sum += report.distance_error.0;
        distance_max = distance_max.max(report.distance_error.0);
        distance_min = distance_min.min(report.distance_error.0);
        azimuth_sum += report.azimuth_error.0;
        azimuth_max = azimuth_max.max(report.azimuth_error.0);
        azimuth_min = azimuth_min.min(report.azimuth_error.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = calculations.len() as f64;
    PrecisionMetrics {
        mean_distance_error: Metres(distance_sum / count),
        max_distance_error: Metres(distance_max),
        min_distance_error: Metres(distance_min),
        mean_azimuth_error: Degrees(azimuth_sum / count),
        max_azimuth_error: Degrees(azimuth_max),
        min_azimuth_error: Degrees(azimuth_min),
        count: calculations.len(),
    }
}
