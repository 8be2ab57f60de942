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

//! Error type.

use std::error::Error;
use std::fmt;

/// An error which can be returned when a numeral cannot be converted.
///
/// There is a single outcome, "invalid number"; the kind only refines
/// the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNumber {
    kind: InvalidNumberKind,
}

/// Why a numeral was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidNumberKind {
    /// Nothing to parse, or only a sign.
    Empty,
    /// The input exceeds `MAX_INPUT_LEN` bytes.
    TooLong,
    /// The input does not follow the numeral grammar.
    Malformed,
}

impl fmt::Display for InvalidNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.kind {
            InvalidNumberKind::Empty => write!(f, "invalid number: empty numeral"),
            InvalidNumberKind::TooLong => write!(f, "invalid number: numeral is too long"),
            InvalidNumberKind::Malformed => write!(f, "invalid number"),
        }
    }
}

impl Error for InvalidNumber {}

impl InvalidNumber {
    #[inline]
    pub(crate) const fn new(kind: InvalidNumberKind) -> Self {
        InvalidNumber { kind }
    }

    #[inline]
    pub(crate) const fn empty() -> Self {
        Self::new(InvalidNumberKind::Empty)
    }

    #[inline]
    pub(crate) const fn too_long() -> Self {
        Self::new(InvalidNumberKind::TooLong)
    }

    #[inline]
    pub(crate) const fn malformed() -> Self {
        Self::new(InvalidNumberKind::Malformed)
    }

    /// Returns the reason of the rejection.
    #[inline]
    pub const fn kind(&self) -> InvalidNumberKind {
        self.kind
    }
}
