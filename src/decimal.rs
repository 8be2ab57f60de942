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

//! Decimal buffer.
//!
//! A `Decimal` is a bounded-capacity decimal significand together with the
//! position of its radix point. The value represented is
//! `0.d[0]d[1]...d[num_digits - 1] * 10 ** decimal_point`, so digits
//! `{7, 8, 9}` with `decimal_point = 1` stand for `7.89`.
//!
//! Digits that do not fit in the buffer are dropped. Dropping a nonzero
//! digit sets the sticky `truncated` flag, which means the true value is
//! strictly greater than the stored one. The flag is never cleared.

use std::fmt;

/// Number of decimal digits a `Decimal` can hold.
///
/// The longest exact decimal expansion of a binary64 half-way value has 768
/// significant digits, so every such value fits without truncation.
pub const DIGITS_CAPACITY: usize = 800;

/// A `decimal_point` below `-DECIMAL_POINT_RANGE` is treated as exact zero,
/// one above `DECIMAL_POINT_RANGE` as infinity.
///
/// Binary64 spans roughly `[10 ** -324, 10 ** 309)`, so the range is wide
/// enough for every supported width.
pub const DECIMAL_POINT_RANGE: i32 = 350;

/// Bounded-capacity decimal value.
///
/// Invariants:
/// * `digits[0]` is never zero while `num_digits > 0`.
/// * `digits[num_digits - 1]` is never zero.
/// * a zero value has `num_digits == 0` and `decimal_point == 0`.
#[derive(Clone)]
pub struct Decimal {
    digits: [u8; DIGITS_CAPACITY],
    num_digits: usize,
    decimal_point: i32,
    truncated: bool,
}

impl Decimal {
    /// Creates a zero decimal.
    #[inline]
    pub const fn new() -> Self {
        Decimal {
            digits: [0; DIGITS_CAPACITY],
            num_digits: 0,
            decimal_point: 0,
            truncated: false,
        }
    }

    /// Returns the significant digits, each in `0..=9`.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.num_digits]
    }

    #[inline]
    pub const fn num_digits(&self) -> usize {
        self.num_digits
    }

    #[inline]
    pub const fn decimal_point(&self) -> i32 {
        self.decimal_point
    }

    /// Checks if a nonzero digit has ever been dropped.
    #[inline]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.num_digits == 0
    }

    /// Returns the leading digit, or zero for a zero value.
    #[inline]
    pub(crate) fn leading_digit(&self) -> u8 {
        if self.num_digits == 0 {
            0
        } else {
            self.digits[0]
        }
    }

    /// Appends a digit after the last stored one.
    ///
    /// The caller keeps `decimal_point` in step.
    #[inline]
    pub(crate) fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        if self.num_digits < DIGITS_CAPACITY {
            self.digits[self.num_digits] = digit;
            self.num_digits += 1;
        } else if digit != 0 {
            self.truncated = true;
        }
    }

    #[inline]
    pub(crate) fn shift_decimal_point(&mut self, delta: i32) {
        self.decimal_point += delta;
    }

    /// Strips the trailing zeroes, and normalizes zero.
    pub(crate) fn trim(&mut self) {
        while self.num_digits > 0 && self.digits[self.num_digits - 1] == 0 {
            self.num_digits -= 1;
        }

        if self.num_digits == 0 {
            self.decimal_point = 0;
        }
    }

    /// Collapses the value to exact zero. `truncated` is left untouched.
    #[inline]
    fn zeroed(&mut self) {
        self.num_digits = 0;
        self.decimal_point = 0;
    }

    /// Doubles the value in place.
    pub fn mul2(&mut self) {
        let n = self.num_digits;
        if n == 0 {
            return;
        }

        // A leading digit of 5 or more carries into a new leading digit.
        let shift = if self.digits[0] >= 5 { 1 } else { 0 };

        let mut carry = 0;
        for i in (0..n).rev() {
            let d = self.digits[i] * 2 + carry;
            carry = d / 10;
            let w = i + shift;
            if w < DIGITS_CAPACITY {
                self.digits[w] = d % 10;
            } else if d % 10 != 0 {
                self.truncated = true;
            }
        }

        if shift == 1 {
            debug_assert_eq!(carry, 1);
            self.digits[0] = carry;
            self.num_digits = (n + 1).min(DIGITS_CAPACITY);
            self.decimal_point += 1;
        } else {
            debug_assert_eq!(carry, 0);
        }

        self.trim();
    }

    /// Halves the value in place.
    ///
    /// A value that falls below `10 ** -DECIMAL_POINT_RANGE` collapses to
    /// exact zero.
    pub fn div2(&mut self) {
        let mut r = 0;
        let mut w = 0;
        let mut n: u32 = 0;

        // Pick up enough leading digits to produce the first output digit.
        while n >> 1 == 0 {
            if r >= self.num_digits {
                if n == 0 {
                    self.zeroed();
                    return;
                }
                while n >> 1 == 0 {
                    n *= 10;
                    r += 1;
                }
                break;
            }
            n = n * 10 + self.digits[r] as u32;
            r += 1;
        }

        self.decimal_point -= r as i32 - 1;
        if self.decimal_point < -DECIMAL_POINT_RANGE {
            self.zeroed();
            return;
        }

        // w < r, so reads stay ahead of writes.
        while r < self.num_digits {
            let c = self.digits[r] as u32;
            self.digits[w] = (n >> 1) as u8;
            w += 1;
            n = (n & 1) * 10 + c;
            r += 1;
        }

        while n > 0 {
            let d = (n >> 1) as u8;
            if w < DIGITS_CAPACITY {
                self.digits[w] = d;
                w += 1;
            } else if d > 0 {
                self.truncated = true;
            }
            n = (n & 1) * 10;
        }

        self.num_digits = w;
        self.trim();
    }

    /// Returns the value rounded to an integer, ties to even.
    ///
    /// A set `truncated` flag breaks an apparent tie upwards. Values of
    /// `10 ** 19` or more saturate to `u64::MAX`.
    pub(crate) fn rounded_integer(&self) -> u64 {
        if self.decimal_point > 19 {
            return u64::MAX;
        }

        let dp = self.decimal_point.max(0) as usize;
        let mut n: u64 = 0;
        let mut i = 0;
        while i < dp && i < self.num_digits {
            n = n * 10 + self.digits[i] as u64;
            i += 1;
        }
        while i < dp {
            n *= 10;
            i += 1;
        }

        if self.should_round_up(self.decimal_point) {
            n += 1;
        }

        n
    }

    /// Decides whether truncating at `nd` digits must round up.
    fn should_round_up(&self, nd: i32) -> bool {
        if nd < 0 || nd as usize >= self.num_digits {
            return false;
        }

        let nd = nd as usize;
        if self.digits[nd] == 5 && nd + 1 == self.num_digits {
            // exactly half-way, unless digits were dropped
            if self.truncated {
                return true;
            }
            return nd > 0 && self.digits[nd - 1] % 2 == 1;
        }

        self.digits[nd] >= 5
    }
}

impl Default for Decimal {
    #[inline]
    fn default() -> Self {
        Decimal::new()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.digits() == other.digits()
            && self.decimal_point == other.decimal_point
            && self.truncated == other.truncated
    }
}

impl Eq for Decimal {}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decimal")
            .field("digits", &self.digits())
            .field("decimal_point", &self.decimal_point)
            .field("truncated", &self.truncated)
            .finish()
    }
}

/// Writes the stored value in positional notation, followed by `...` if
/// digits were dropped.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num_digits == 0 {
            f.write_str("0")?;
        } else {
            let digits = self.digits();
            let dp = self.decimal_point;
            if dp <= 0 {
                f.write_str("0.")?;
                for _ in 0..-dp {
                    f.write_str("0")?;
                }
                write_digits(f, digits)?;
            } else if dp as usize >= digits.len() {
                write_digits(f, digits)?;
                for _ in digits.len()..dp as usize {
                    f.write_str("0")?;
                }
            } else {
                let (integral, fractional) = digits.split_at(dp as usize);
                write_digits(f, integral)?;
                f.write_str(".")?;
                write_digits(f, fractional)?;
            }
        }

        if self.truncated {
            f.write_str("...")?;
        }

        Ok(())
    }
}

#[inline]
fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
    for &d in digits {
        write!(f, "{}", d)?;
    }
    Ok(())
}
