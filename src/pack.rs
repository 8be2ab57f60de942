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

//! Rounding a scaled decimal to a binary format.

use crate::decimal::Decimal;

/// An IEEE-754 binary interchange format, described by the widths of its
/// exponent and mantissa fields. The sign bit sits above both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    exp_bits: u32,
    man_bits: u32,
}

impl Format {
    /// binary16
    pub const F16: Format = Format::new(5, 10);
    /// binary32
    pub const F32: Format = Format::new(8, 23);
    /// binary64
    pub const F64: Format = Format::new(11, 52);

    #[inline]
    const fn new(exp_bits: u32, man_bits: u32) -> Self {
        Format { exp_bits, man_bits }
    }

    #[inline]
    pub const fn exp_bits(self) -> u32 {
        self.exp_bits
    }

    #[inline]
    pub const fn man_bits(self) -> u32 {
        self.man_bits
    }

    /// Width of the whole encoding, sign included.
    #[inline]
    pub const fn total_bits(self) -> u32 {
        1 + self.exp_bits + self.man_bits
    }

    #[inline]
    pub const fn bias(self) -> i32 {
        (1 << (self.exp_bits - 1)) - 1
    }

    /// The all-ones exponent field value.
    #[inline]
    const fn max_biased_exponent(self) -> i32 {
        (1 << self.exp_bits) - 1
    }

    #[inline]
    const fn mantissa_mask(self) -> u64 {
        (1 << self.man_bits) - 1
    }

    /// Positive infinity pattern.
    #[inline]
    pub const fn infinity(self) -> u64 {
        (self.max_biased_exponent() as u64) << self.man_bits
    }

    #[inline]
    pub const fn sign_bit(self) -> u64 {
        1 << (self.exp_bits + self.man_bits)
    }
}

/// Packs one scaled decimal into successively wider formats.
///
/// The decimal is doubled in place as formats widen, so formats must be
/// requested in order of non-decreasing mantissa width.
pub(crate) struct Packer {
    // value in [1, 2) times 2 ** widened
    scaled: Decimal,
    exp2: i32,
    widened: u32,
}

impl Packer {
    /// `scaled` must lie in `[1, 2)`, with the original value equal to
    /// `scaled * 2 ** exp2`.
    #[inline]
    pub fn new(scaled: Decimal, exp2: i32) -> Self {
        Packer {
            scaled,
            exp2,
            widened: 0,
        }
    }

    /// Returns the correctly rounded magnitude pattern for `format`.
    pub fn pack(&mut self, format: Format) -> u64 {
        debug_assert!(format.man_bits >= self.widened);
        while self.widened < format.man_bits {
            self.scaled.mul2();
            self.widened += 1;
        }

        let mut mantissa = self.scaled.rounded_integer();
        let mut exp2 = self.exp2;

        // rounding carried into a new bit
        if mantissa >> (format.man_bits + 1) != 0 {
            mantissa >>= 1;
            exp2 += 1;
        }

        let biased = exp2 + format.bias();
        if biased >= format.max_biased_exponent() {
            return format.infinity();
        }
        if biased > 0 {
            return ((biased as u64) << format.man_bits) | (mantissa & format.mantissa_mask());
        }

        self.pack_subnormal(format)
    }

    /// Rounds at the fixed precision of the subnormal range.
    ///
    /// The result is not masked: a value that rounds up to `2 ** man_bits`
    /// becomes the smallest normal pattern.
    fn pack_subnormal(&self, format: Format) -> u64 {
        // subnormal mantissa = value * 2 ** (man_bits + bias - 1)
        let mut shift =
            self.exp2 + format.bias() - 1 + format.man_bits as i32 - self.widened as i32;
        debug_assert!(shift < 0);

        // below half of the smallest subnormal
        if shift + self.widened as i32 <= -2 {
            return 0;
        }

        let mut dec = self.scaled.clone();
        while shift < 0 {
            dec.div2();
            shift += 1;
        }

        dec.rounded_integer()
    }
}
