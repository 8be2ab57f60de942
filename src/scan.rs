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

//! Extraction of numeral-looking strings from arbitrary text.
//!
//! One `Scan` collects the distinct numerals of any number of inputs and
//! renders them as sorted `"<F16> <F32> <F64> <numeral>"` lines.

use crate::convert::parse_bits;
use lazy_static::lazy_static;
use log::debug;
use regex::bytes::Regex;
use std::collections::BTreeSet;
use std::ffi::OsStr;

/// Number of leading bytes inspected by `is_text`.
pub const TEXT_PREFIX_LEN: usize = 1024;

/// Longest run of bytes taken from one pattern match.
pub const MAX_RUN_LEN: usize = 1024;

lazy_static! {
    static ref NUMERAL: Regex =
        Regex::new(r"[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?").expect("valid numeral pattern");
}

/// Checks if `bytes` look like text: the first `TEXT_PREFIX_LEN` bytes are
/// valid UTF-8 except possibly for a multi-byte sequence cut off at the end
/// of that prefix.
pub fn is_text(bytes: &[u8]) -> bool {
    let prefix = &bytes[..bytes.len().min(TEXT_PREFIX_LEN)];
    match std::str::from_utf8(prefix) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Checks if a file or directory name is dot-prefixed.
pub fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Strips leading zeroes, keeping the one before a `.` or at the end.
fn trim_leading_zeros(mut s: &[u8]) -> &[u8] {
    while s.len() > 1 && s[0] == b'0' && s[1].is_ascii_digit() {
        s = &s[1..];
    }
    s
}

/// Strips trailing bytes that are not digits.
fn trim_trailing_non_digits(s: &[u8]) -> &[u8] {
    let n = s.iter().rev().take_while(|c| !c.is_ascii_digit()).count();
    &s[..s.len() - n]
}

/// The distinct numerals found by one scan.
#[derive(Debug, Default, Clone)]
pub struct Scan {
    numerals: BTreeSet<String>,
}

impl Scan {
    #[inline]
    pub fn new() -> Self {
        Scan::default()
    }

    /// Collects every numeral in `bytes`.
    ///
    /// Returns false, collecting nothing, if `bytes` are not text.
    pub fn scan_bytes(&mut self, bytes: &[u8]) -> bool {
        if !is_text(bytes) {
            return false;
        }

        let before = self.numerals.len();
        for m in NUMERAL.find_iter(bytes) {
            let run = m.as_bytes();
            let run = &run[..run.len().min(MAX_RUN_LEN)];
            let numeral = trim_trailing_non_digits(trim_leading_zeros(run));
            if numeral.is_empty() {
                continue;
            }
            // the pattern only matches ASCII
            let numeral = String::from_utf8_lossy(numeral).into_owned();
            self.numerals.insert(numeral);
        }
        debug!("collected {} new numerals", self.numerals.len() - before);

        true
    }

    /// Number of distinct numerals.
    #[inline]
    pub fn len(&self) -> usize {
        self.numerals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numerals.is_empty()
    }

    /// The distinct numerals, in lexicographic order.
    pub fn numerals(&self) -> impl Iterator<Item = &str> {
        self.numerals.iter().map(String::as_str)
    }

    /// Returns `"<F16> <F32> <F64> <numeral>"` for every numeral that
    /// converts, sorted lexicographically. The others are dropped.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .numerals
            .iter()
            .filter_map(|s| {
                parse_bits(s.as_bytes())
                    .ok()
                    .map(|bits| format!("{} {}", bits, s))
            })
            .collect();
        lines.sort();
        lines
    }
}
