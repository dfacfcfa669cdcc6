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

//! icao-navfix
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for calculating navigation-database fix positions (waypoints
//! and approach fixes) on the
//! [WGS-84](https://www.icao.int/NACC/Documents/Meetings/2014/ECARAIM/REF08-Doc9674.pdf)
//! ellipsoid.
//!
//! Aeronautical charts place fixes relative to radio navigation aids:
//! a waypoint may be defined by a bearing ("radial") and distance from a
//! VOR, or by the intersection of a radial from one station with a
//! distance circle measured against the DME of a second station.
//! This library computes such positions:
//!
//! - [`projection::project`] performs forward projection along a geodesic
//!   at a constant azimuth, with inverse self-verification and adaptive
//!   multi-step refinement for very long paths;
//! - [`intersection::solve_intersection`] locates the point on a bearing
//!   ray from one position at a required distance from another position.
//!   No closed form exists on an ellipsoid, so the solver performs bounded
//!   1-D root finding over the geodesy primitives;
//! - [`accuracy::validate`] round-trips a computed position and reports
//!   distance and azimuth errors with a qualitative [`accuracy::Rating`];
//! - [`designator::radius_letter`] encodes a distance as the single-letter
//!   radius designator used by chart-naming conventions.
//!
//! ## Design
//!
//! All geodesic mathematics is delegated to the [`Geodesy`] capability,
//! with exactly two operations: `direct` (position, azimuth and distance
//! to destination) and `inverse` (positions to distance and azimuths).
//! [`Wgs84Geodesy`] implements it with the
//! [icao-wgs84](https://crates.io/crates/icao-wgs84) crate; it is stateless
//! and shareable, injected by reference into every operation.
//! Distances are [`NauticalMiles`] at the API boundary and [`Metres`] at
//! every oracle call, converted exactly at each boundary and never
//! compounded.
//!
//! The library depends upon the following crates:
//!
//! - [icao-wgs84](https://crates.io/crates/icao-wgs84) - to perform the
//!   direct and inverse geodesic calculations on the WGS-84 ellipsoid;
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [icao-units](https://crates.io/crates/icao-units) - to define `Metres`
//!   and `NauticalMiles` and perform conversions between them;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define
//!   `LatLong` and validate latitude and longitude ranges;
//! - [thiserror](https://crates.io/crates/thiserror) - to derive the
//!   error type;
//! - [log](https://crates.io/crates/log) - to trace solver iterations.

extern crate angle_sc;
extern crate icao_units;
extern crate icao_wgs84;
extern crate unit_sphere;

pub mod accuracy;
pub mod declination;
pub mod designator;
pub mod geodesy;
pub mod intersection;
pub mod projection;

pub use angle_sc::{Angle, Degrees, Radians};
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

pub use accuracy::{
    calculate_precision_metrics, validate, AccuracyReport, PrecisionMetrics, Rating,
};
pub use declination::{DeclinationModel, ZeroDeclination};
pub use designator::radius_letter;
pub use geodesy::{Geodesy, InverseSolution, Wgs84Geodesy};
pub use intersection::{solve_intersection, IntersectionQuery, IntersectionSolution, SearchState};
pub use projection::project;

use core::fmt;
use thiserror::Error;

/// The errors reported by fix calculations.
///
/// All input validation is performed at construction or operation entry,
/// never inside an iteration loop.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// A latitude outside -90.0..=90.0 degrees.
    #[error("invalid latitude value: `{0}`")]
    InvalidLatitude(f64),
    /// A longitude outside -180.0..=180.0 degrees.
    #[error("invalid longitude value: `{0}`")]
    InvalidLongitude(f64),
    /// A bearing outside 0.0..360.0 degrees.
    #[error("invalid bearing value: `{0}`")]
    InvalidBearing(f64),
    /// A zero or negative projection distance, in Nautical Miles.
    #[error("invalid distance value: `{0}`")]
    InvalidDistance(f64),
    /// A degenerate intersection search bracket, in Nautical Miles.
    #[error("invalid search range: `{min}..{max}`")]
    InvalidSearchRange {
        /// The lower bracket bound.
        min: f64,
        /// The upper bracket bound.
        max: f64,
    },
}

/// A position in geodetic coordinates: a validated latitude and longitude.
///
/// An immutable value type; computed positions are always freshly
/// constructed, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint(pub(crate) LatLong);

impl GeoPoint {
    /// Construct a `GeoPoint` from a latitude and longitude.
    /// * `lat` - the latitude, -90.0..=90.0 degrees.
    /// * `lon` - the longitude, -180.0..=180.0 degrees.
    ///
    /// # Errors
    ///
    /// `Error::InvalidLatitude` or `Error::InvalidLongitude` if a value is
    /// out of range.
    pub fn new(lat: Degrees, lon: Degrees) -> Result<Self, Error> {
        if !unit_sphere::is_valid_latitude(lat.0) {
            Err(Error::InvalidLatitude(lat.0))
        } else if !unit_sphere::is_valid_longitude(lon.0) {
            Err(Error::InvalidLongitude(lon.0))
        } else {
            Ok(Self(LatLong::new(lat, lon)))
        }
    }

    /// Accessor for the latitude.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        self.0.lat()
    }

    /// Accessor for the longitude.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        self.0.lon()
    }

    /// Accessor for the position as a `LatLong`.
    #[must_use]
    pub const fn as_lat_long(&self) -> &LatLong {
        &self.0
    }
}

impl TryFrom<&LatLong> for GeoPoint {
    type Error = Error;

    /// Construct a `GeoPoint` from an unvalidated `LatLong`.
    fn try_from(position: &LatLong) -> Result<Self, Self::Error> {
        Self::new(position.lat(), position.lon())
    }
}

impl fmt::Display for GeoPoint {
    /// Format as "latitude longitude" to navigation-database precision.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.9} {:.9}", self.lat().0, self.lon().0)
    }
}

/// A true bearing in degrees, 0.0..360.0 clockwise from true North.
///
/// A magnetic bearing is only meaningful together with a declination;
/// convert it with [`Bearing::from_magnetic`] before use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bearing(Degrees);

impl Bearing {
    /// Construct a `Bearing` from a true bearing.
    /// * `degrees` - the bearing, 0.0..360.0 degrees.
    ///
    /// # Errors
    ///
    /// `Error::InvalidBearing` if the value is out of range.
    pub fn new(degrees: Degrees) -> Result<Self, Error> {
        if (0.0..360.0).contains(&degrees.0) {
            Ok(Self(degrees))
        } else {
            Err(Error::InvalidBearing(degrees.0))
        }
    }

    /// Construct a `Bearing` from a magnetic bearing and the local
    /// magnetic declination: true = magnetic + declination, mod 360.
    /// * `magnetic` - the magnetic bearing in degrees.
    /// * `declination` - the declination in degrees, East positive.
    #[must_use]
    pub fn from_magnetic(magnetic: Degrees, declination: Degrees) -> Self {
        Self(Degrees((magnetic.0 + declination.0).rem_euclid(360.0)))
    }

    /// Accessor for the bearing in `Degrees`.
    #[must_use]
    pub const fn degrees(&self) -> Degrees {
        self.0
    }
}
