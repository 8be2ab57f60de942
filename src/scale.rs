// Copyright 2020 CoD Technologies Corp.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Binary exponent search.

use crate::decimal::{Decimal, DECIMAL_POINT_RANGE};

/// Outcome of bracketing a decimal into `[1, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaled {
    /// The value is exactly zero, or too small for any width.
    Zero,
    /// The value is too large for any width.
    Infinity,
    /// The decimal now lies in `[1, 2)` and the original value was
    /// `decimal * 2 ** exp2`.
    InRange { exp2: i32 },
}

impl Decimal {
    /// Finds `exp2` such that `self * 2 ** -exp2` lies in `[1, 2)`, and
    /// leaves `self` holding that scaled value.
    ///
    /// Zero and infinity are recognized before any further step is taken.
    pub fn scale(&mut self) -> Scaled {
        let mut exp2 = 0;

        loop {
            if self.is_zero() || self.decimal_point() < -DECIMAL_POINT_RANGE {
                return Scaled::Zero;
            }
            if self.decimal_point() > DECIMAL_POINT_RANGE {
                return Scaled::Infinity;
            }

            if self.decimal_point() < 1 {
                self.mul2();
                exp2 -= 1;
            } else if self.decimal_point() > 1 || self.leading_digit() >= 2 {
                self.div2();
                exp2 += 1;
            } else {
                return Scaled::InRange { exp2 };
            }
        }
    }
}
