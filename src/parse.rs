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

//! Numeral parsing utilities.

use crate::decimal::Decimal;
use crate::error::InvalidNumber;

/// Longest accepted input, sign included.
pub const MAX_INPUT_LEN: usize = 65536;

/// Exponent digits stop accumulating once the magnitude reaches this bound.
///
/// It exceeds `MAX_INPUT_LEN + DECIMAL_POINT_RANGE`, so a saturated exponent
/// still classifies the value as zero or infinity.
pub const EXPONENT_SATURATION: i32 = 1_000_000;

/// Carves off decimal digits up to the first non-digit character.
#[inline]
pub(crate) fn eat_digits(s: &[u8]) -> (&[u8], &[u8]) {
    let i = s.iter().take_while(|&i| i.is_ascii_digit()).count();
    (&s[..i], &s[i..])
}

/// Splits a numeral into a negative flag and the rest, without inspecting
/// or validating the rest.
#[inline]
pub(crate) fn extract_sign(s: &[u8]) -> (bool, &[u8]) {
    match s.first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    }
}

/// Extracts the exponent following an `e` or `E` marker.
fn extract_exponent(s: &[u8]) -> Result<(i32, &[u8]), InvalidNumber> {
    let (negative, s) = extract_sign(s);
    let (number, s) = eat_digits(s);

    if number.is_empty() {
        return Err(InvalidNumber::malformed());
    }

    let mut exp: i32 = 0;
    for &n in number {
        if exp < EXPONENT_SATURATION {
            exp = exp * 10 + (n - b'0') as i32;
        }
    }

    Ok((if negative { -exp } else { exp }, s))
}

impl Decimal {
    /// Parses an unsigned numeral.
    ///
    /// The accepted grammar is `digit* ['.' digit*] [('e'|'E') ['+'|'-'] digit+]`
    /// with at least one mantissa digit. The whole input must be consumed.
    pub fn from_bytes(s: &[u8]) -> Result<Decimal, InvalidNumber> {
        if s.is_empty() {
            return Err(InvalidNumber::empty());
        }
        if s.len() > MAX_INPUT_LEN {
            return Err(InvalidNumber::too_long());
        }

        let (integral, s) = eat_digits(s);
        let (fractional, s) = match s.first() {
            Some(&b'.') => eat_digits(&s[1..]),
            _ => (b"".as_ref(), s),
        };

        if integral.is_empty() && fractional.is_empty() {
            return Err(InvalidNumber::malformed());
        }

        let (exp, s) = match s.first() {
            Some(&b'e') | Some(&b'E') => extract_exponent(&s[1..])?,
            _ => (0, s),
        };

        // a second '.', or any other trailing garbage
        if !s.is_empty() {
            return Err(InvalidNumber::malformed());
        }

        let mut dec = Decimal::new();
        for &c in integral {
            let digit = c - b'0';
            // leading zeroes are not stored
            if digit == 0 && dec.is_zero() {
                continue;
            }
            dec.push_digit(digit);
            dec.shift_decimal_point(1);
        }
        for &c in fractional {
            let digit = c - b'0';
            if digit == 0 && dec.is_zero() {
                dec.shift_decimal_point(-1);
                continue;
            }
            dec.push_digit(digit);
        }

        dec.shift_decimal_point(exp);
        dec.trim();

        Ok(dec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::DIGITS_CAPACITY;
    use crate::error::InvalidNumberKind;

    fn assert_parse_invalid<S: AsRef<[u8]>>(s: S, kind: InvalidNumberKind) {
        let result = Decimal::from_bytes(s.as_ref());
        assert_eq!(result.unwrap_err().kind(), kind);
    }

    fn assert_parse<S: AsRef<str>>(s: S, digits: &[u8], decimal_point: i32) {
        let dec = Decimal::from_bytes(s.as_ref().as_bytes()).unwrap();
        assert_eq!(dec.digits(), digits, "digits of {}", s.as_ref());
        assert_eq!(dec.decimal_point(), decimal_point, "point of {}", s.as_ref());
        assert!(!dec.is_truncated());
    }

    #[test]
    fn parse_error() {
        assert_parse_invalid("", InvalidNumberKind::Empty);
        assert_parse_invalid(".", InvalidNumberKind::Malformed);
        assert_parse_invalid("1.2.3", InvalidNumberKind::Malformed);
        assert_parse_invalid("1e", InvalidNumberKind::Malformed);
        assert_parse_invalid("1e+", InvalidNumberKind::Malformed);
        assert_parse_invalid("1e-", InvalidNumberKind::Malformed);
        assert_parse_invalid("1E", InvalidNumberKind::Malformed);
        assert_parse_invalid("e1", InvalidNumberKind::Malformed);
        assert_parse_invalid(".e1", InvalidNumberKind::Malformed);
        assert_parse_invalid("12a", InvalidNumberKind::Malformed);
        assert_parse_invalid("1e1.1", InvalidNumberKind::Malformed);
        assert_parse_invalid("1 ", InvalidNumberKind::Malformed);
        assert_parse_invalid(" 1", InvalidNumberKind::Malformed);
        assert_parse_invalid("-1", InvalidNumberKind::Malformed);
        assert_parse_invalid("+1", InvalidNumberKind::Malformed);
        assert_parse_invalid("1_000", InvalidNumberKind::Malformed);
        assert_parse_invalid("0x10", InvalidNumberKind::Malformed);
        assert_parse_invalid("inf", InvalidNumberKind::Malformed);
        assert_parse_invalid("NaN", InvalidNumberKind::Malformed);
        assert_parse_invalid("1,5", InvalidNumberKind::Malformed);
        assert_parse_invalid("1e++1", InvalidNumberKind::Malformed);
        assert_parse_invalid(vec![b'1'; MAX_INPUT_LEN + 1], InvalidNumberKind::TooLong);
    }

    #[test]
    fn parse_valid() {
        assert_parse("0", &[], 0);
        assert_parse("000", &[], 0);
        assert_parse("0.0", &[], 0);
        assert_parse("0e999", &[], 0);
        assert_parse(".0", &[], 0);
        assert_parse("0.", &[], 0);
        assert_parse("789", &[7, 8, 9], 3);
        assert_parse("7.89", &[7, 8, 9], 1);
        assert_parse("0.789", &[7, 8, 9], 0);
        assert_parse(".789", &[7, 8, 9], 0);
        assert_parse("0.00789", &[7, 8, 9], -2);
        assert_parse("000789.000", &[7, 8, 9], 3);
        assert_parse("789.", &[7, 8, 9], 3);
        assert_parse("7890000", &[7, 8, 9], 7);
        assert_parse("1.5e3", &[1, 5], 4);
        assert_parse("1.5E+3", &[1, 5], 4);
        assert_parse("1.5e-3", &[1, 5], -2);
        assert_parse("15e-0003", &[1, 5], -1);
        assert_parse("100.001", &[1, 0, 0, 0, 0, 1], 3);
    }

    #[test]
    fn exponent_saturates() {
        let dec = Decimal::from_bytes(b"1e99999999999999999999999999").unwrap();
        assert!(dec.decimal_point() > EXPONENT_SATURATION);

        let dec = Decimal::from_bytes(b"1e-99999999999999999999999999").unwrap();
        assert!(dec.decimal_point() < -EXPONENT_SATURATION);
    }

    #[test]
    fn long_input() {
        let s = format!("0.{}1e{}", "0".repeat(60000), 60100);
        let dec = Decimal::from_bytes(s.as_bytes()).unwrap();
        assert_eq!(dec.digits(), &[1]);
        assert_eq!(dec.decimal_point(), 100);
    }

    #[test]
    fn capacity() {
        // dropped zeroes do not count as truncation
        let s = format!("1{}", "0".repeat(DIGITS_CAPACITY * 2));
        let dec = Decimal::from_bytes(s.as_bytes()).unwrap();
        assert_eq!(dec.digits(), &[1]);
        assert_eq!(dec.decimal_point(), DIGITS_CAPACITY as i32 * 2 + 1);
        assert!(!dec.is_truncated());

        let s = format!("1{}7", "0".repeat(DIGITS_CAPACITY));
        let dec = Decimal::from_bytes(s.as_bytes()).unwrap();
        assert_eq!(dec.digits(), &[1]);
        assert_eq!(dec.decimal_point(), DIGITS_CAPACITY as i32 + 2);
        assert!(dec.is_truncated());

        let s = format!("0.{}{}9", "0".repeat(10), "3".repeat(DIGITS_CAPACITY));
        let dec = Decimal::from_bytes(s.as_bytes()).unwrap();
        assert_eq!(dec.num_digits(), DIGITS_CAPACITY);
        assert_eq!(dec.decimal_point(), -10);
        assert!(dec.is_truncated());
    }
}
