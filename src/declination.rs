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

//! The `declination` module defines the magnetic declination capability.
//!
//! Radials are published as magnetic bearings, so converting them to the
//! true bearings the calculations require needs the local declination.
//! A geomagnetic model is a host concern: the host selects a
//! [`DeclinationModel`] once at startup and injects it. When no model is
//! available [`ZeroDeclination`] degrades gracefully by treating
//! magnetic bearings as true.

use crate::GeoPoint;
use angle_sc::Degrees;

/// The magnetic declination capability.
pub trait DeclinationModel {
    /// The magnetic declination at a position, in degrees, East
    /// positive.
    /// * `position` - the position to evaluate the declination at.
    fn declination(&self, position: &GeoPoint) -> Degrees;
}

/// The degraded variant for hosts without a geomagnetic model: zero
/// declination everywhere, i.e. magnetic bearings are treated as true.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ZeroDeclination;

impl DeclinationModel for ZeroDeclination {
    fn declination(&self, _position: &GeoPoint) -> Degrees {
        Degrees(0.0)
    }
}
