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

//! The `geodesy` module defines the geodesic oracle capability that every
//! fix calculation is built upon, together with its WGS-84 implementation.
//!
//! The capability has exactly two operations, the classical geodesic
//! problems:
//!
//! - the "direct" problem: given a position, an azimuth and a distance,
//!   find the destination position;
//! - the "inverse" problem: given two positions, find the geodesic
//!   distance between them and the azimuths at each end.
//!
//! The library never re-implements geodesic mathematics; the fix
//! calculations only ever observe the ellipsoid through these two
//! operations, so they can be tested against any `Geodesy` implementation.

use crate::GeoPoint;
use angle_sc::{Angle, Degrees, Radians};
use icao_units::si::Metres;
use icao_wgs84::{calculate_azimuths_and_geodesic_length, GeodesicSegment, WGS84_ELLIPSOID};
use unit_sphere::great_circle;

/// The result of an inverse geodesic calculation between two positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The geodesic distance between the positions.
    pub distance: Metres,
    /// The azimuth at the start position, in degrees from true North,
    /// as a principal value: -180.0..=180.0.
    pub azimuth: Degrees,
    /// The azimuth at the end position, in degrees from true North,
    /// as a principal value: -180.0..=180.0.
    pub end_azimuth: Degrees,
}

/// The geodesic oracle capability.
///
/// Implementations are required to be pure functions of their inputs:
/// stateless, reentrant and accurate to well below the tolerances of the
/// calculations built on top of them.
pub trait Geodesy {
    /// Calculate the geodesic distance and azimuths between two positions,
    /// the "inverse" geodesic problem.
    /// * `a`, `b` - the start and finish positions.
    fn inverse(&self, a: &GeoPoint, b: &GeoPoint) -> InverseSolution;

    /// Calculate the destination position from a start position, azimuth
    /// and distance, the "direct" geodesic problem.
    /// * `a` - the start position.
    /// * `azimuth` - the azimuth at the start position, in degrees.
    /// * `distance` - the distance along the geodesic, in metres.
    fn direct(&self, a: &GeoPoint, azimuth: Degrees, distance: Metres) -> GeoPoint;
}

/// The `Geodesy` implementation on the WGS-84 ellipsoid, backed by the
/// `icao-wgs84` crate.
///
/// A stateless, zero-sized capability: share it freely between threads
/// and inject it by reference into each calculation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Wgs84Geodesy;

impl Geodesy for Wgs84Geodesy {
    fn inverse(&self, a: &GeoPoint, b: &GeoPoint) -> InverseSolution {
        let (azimuth, distance, end_azimuth) = calculate_azimuths_and_geodesic_length(
            a.as_lat_long(),
            b.as_lat_long(),
            Radians(great_circle::MIN_VALUE),
            &WGS84_ELLIPSOID,
        );
        InverseSolution {
            distance,
            azimuth: Degrees::from(azimuth),
            end_azimuth: Degrees::from(end_azimuth),
        }
    }

    fn direct(&self, a: &GeoPoint, azimuth: Degrees, distance: Metres) -> GeoPoint {
        let segment =
            GeodesicSegment::from((a.as_lat_long(), Angle::from(azimuth), distance));
        // positions from the oracle are principal values, within range
        GeoPoint(segment.lat_long(distance))
    }
}
