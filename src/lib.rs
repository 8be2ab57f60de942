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

//! Reference conversion of decimal numerals to IEEE-754 binary16, binary32
//! and binary64 bit patterns.
//!
//! The conversion works on a bounded decimal buffer with plain decimal
//! doubling and halving, and never touches native floating-point
//! arithmetic, so it can serve as an oracle for faster parsers. Every
//! result is rounded to nearest with ties to even, subnormals included.
//!
//! ```
//! use numeral_oracle::parse_bits;
//!
//! let bits = parse_bits(b"0.3").unwrap();
//! assert_eq!(bits.f16, 0x34CD);
//! assert_eq!(bits.f32, 0x3E99_999A);
//! assert_eq!(bits.f64, 0x3FD3_3333_3333_3333);
//! ```

mod convert;
mod decimal;
mod error;
mod pack;
mod parse;
mod scale;
pub mod scan;

pub use crate::convert::{parse_bits, FloatBits};
pub use crate::decimal::{Decimal, DECIMAL_POINT_RANGE, DIGITS_CAPACITY};
pub use crate::error::{InvalidNumber, InvalidNumberKind};
pub use crate::pack::Format;
pub use crate::parse::{EXPONENT_SATURATION, MAX_INPUT_LEN};
pub use crate::scale::Scaled;
