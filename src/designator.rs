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

//! The `designator` module encodes a distance as the single-letter
//! radius designator used by chart-naming conventions.

use icao_units::non_si::NauticalMiles;

/// Encode a distance as a radius designator letter.
///
/// The letters cover 26 half-open one-mile buckets: [0.1, 1.5) is 'A',
/// [1.5, 2.5) is 'B', up to [25.5, 26.5) for 'Z'. Distances below the
/// first bucket encode as 'A' and distances at or beyond the last
/// bucket as 'Z'.
/// * `distance` - the radius, in Nautical Miles.
#[must_use]
pub fn radius_letter(distance: NauticalMiles) -> char {
    for index in 0..26_u8 {
        if distance.0 < f64::from(index) + 1.5 {
            return char::from(b'A' + index);
        }
    }
    'Z'
}
