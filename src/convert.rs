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

//! Numeral conversion.

use crate::decimal::Decimal;
use crate::error::InvalidNumber;
use crate::pack::{Format, Packer};
use crate::parse::{extract_sign, MAX_INPUT_LEN};
use crate::scale::Scaled;
use std::fmt;
use std::str::FromStr;

/// The binary16, binary32 and binary64 encodings of one numeral, each
/// rounded to nearest with ties to even.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FloatBits {
    pub f16: u16,
    pub f32: u32,
    pub f64: u64,
}

impl FloatBits {
    #[inline]
    fn from_magnitudes(f16: u64, f32: u64, f64: u64) -> Self {
        FloatBits {
            f16: f16 as u16,
            f32: f32 as u32,
            f64,
        }
    }

    #[inline]
    fn negated(self) -> Self {
        FloatBits {
            f16: self.f16 | Format::F16.sign_bit() as u16,
            f32: self.f32 | Format::F32.sign_bit() as u32,
            f64: self.f64 | Format::F64.sign_bit(),
        }
    }

    /// Checks if the sign bit is set.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.f64 >> 63 != 0
    }

    /// Reinterprets the binary32 pattern as a native float.
    #[inline]
    pub fn to_f32(&self) -> f32 {
        f32::from_bits(self.f32)
    }

    /// Reinterprets the binary64 pattern as a native float.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        f64::from_bits(self.f64)
    }
}

/// Converts a numeral, optionally signed, into its three encodings.
///
/// The accepted grammar is
/// `['+'|'-'] digit* ['.' digit*] [('e'|'E') ['+'|'-'] digit+]` with at
/// least one mantissa digit. No whitespace, hexadecimal or special values.
pub fn parse_bits(s: &[u8]) -> Result<FloatBits, InvalidNumber> {
    if s.is_empty() {
        return Err(InvalidNumber::empty());
    }
    if s.len() > MAX_INPUT_LEN {
        return Err(InvalidNumber::too_long());
    }

    let (negative, s) = extract_sign(s);
    let mut dec = Decimal::from_bytes(s)?;

    let bits = match dec.scale() {
        Scaled::Zero => FloatBits::default(),
        Scaled::Infinity => FloatBits::from_magnitudes(
            Format::F16.infinity(),
            Format::F32.infinity(),
            Format::F64.infinity(),
        ),
        Scaled::InRange { exp2 } => {
            let mut packer = Packer::new(dec, exp2);
            let f16 = packer.pack(Format::F16);
            let f32 = packer.pack(Format::F32);
            let f64 = packer.pack(Format::F64);
            FloatBits::from_magnitudes(f16, f32, f64)
        }
    };

    if negative {
        Ok(bits.negated())
    } else {
        Ok(bits)
    }
}

impl FromStr for FloatBits {
    type Err = InvalidNumber;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bits(s.as_bytes())
    }
}

/// Writes the three patterns as upper-case hexadecimal, widest last.
impl fmt::Display for FloatBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} {:08X} {:016X}", self.f16, self.f32, self.f64)
    }
}
