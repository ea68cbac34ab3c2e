// This file is part of the tf-gamefabric project
//
// Copyright (C) ANEO, 2024-2024. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License")
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Resource quantities (`"500m"`, `"1.5"`, `"2Gi"`, `"1e3"`, ...)

use std::str::FromStr;

use thiserror::Error;

/// Numeric value of a resource quantity
///
/// Quantities are stored in a canonical decimal form: `mantissa * 10^exponent`
/// with no trailing zero in the mantissa.
/// Two quantities denoting the same number are therefore equal, whatever their textual form:
///
/// ```
/// use tf_gamefabric::Quantity;
///
/// let millis: Quantity = "1000m".parse().unwrap();
/// let cores: Quantity = "1".parse().unwrap();
/// assert_eq!(millis, cores);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Quantity {
    mantissa: i128,
    exponent: i32,
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,
    #[error("quantity `{0}` does not start with a number")]
    InvalidNumber(String),
    #[error("quantity `{quantity}` has an unknown suffix `{suffix}`")]
    UnknownSuffix { quantity: String, suffix: String },
    #[error("quantity `{0}` is out of range")]
    OutOfRange(String),
}

/// Scale applied by a suffix: `10^decimal * 1024^binary`
struct Scale {
    decimal: i32,
    binary: u32,
}

fn suffix_scale(suffix: &str) -> Option<Scale> {
    let (decimal, binary) = match suffix {
        "" => (0, 0),
        "n" => (-9, 0),
        "u" => (-6, 0),
        "m" => (-3, 0),
        "%" => (-2, 0),
        "k" => (3, 0),
        "M" => (6, 0),
        "G" => (9, 0),
        "T" => (12, 0),
        "P" => (15, 0),
        "E" => (18, 0),
        "Ki" => (0, 1),
        "Mi" => (0, 2),
        "Gi" => (0, 3),
        "Ti" => (0, 4),
        "Pi" => (0, 5),
        "Ei" => (0, 6),
        _ => {
            // decimal exponent: `1e3`, `5E-2`
            let exponent = suffix.strip_prefix(['e', 'E'])?;
            return exponent.parse::<i32>().ok().map(|decimal| Scale { decimal, binary: 0 });
        }
    };
    Some(Scale { decimal, binary })
}

impl Quantity {
    /// Zero quantity
    pub const ZERO: Quantity = Quantity {
        mantissa: 0,
        exponent: 0,
    };

    /// Strip the trailing zeros of `mantissa`, or [`None`] if the exponent overflows
    fn canonical(mut mantissa: i128, mut exponent: i32) -> Option<Self> {
        if mantissa == 0 {
            return Some(Self::ZERO);
        }
        while mantissa % 10 == 0 {
            mantissa /= 10;
            exponent = exponent.checked_add(1)?;
        }
        Some(Self { mantissa, exponent })
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let out_of_range = || QuantityError::OutOfRange(s.to_owned());
        let input = s.trim();
        if input.is_empty() {
            return Err(QuantityError::Empty);
        }

        let (negative, unsigned) = match input.as_bytes()[0] {
            b'-' => (true, &input[1..]),
            b'+' => (false, &input[1..]),
            _ => (false, input),
        };

        let number_len = unsigned
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(unsigned.len());
        let (number, suffix) = unsigned.split_at(number_len);
        let (integral, fractional) = number.split_once('.').unwrap_or((number, ""));
        if (integral.is_empty() && fractional.is_empty()) || fractional.contains('.') {
            return Err(QuantityError::InvalidNumber(s.to_owned()));
        }

        let scale = suffix_scale(suffix).ok_or_else(|| QuantityError::UnknownSuffix {
            quantity: s.to_owned(),
            suffix: suffix.to_owned(),
        })?;

        let mut mantissa = 0i128;
        for digit in integral.bytes().chain(fractional.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or_else(out_of_range)?;
        }
        if scale.binary > 0 {
            mantissa = 1024i128
                .checked_pow(scale.binary)
                .and_then(|factor| mantissa.checked_mul(factor))
                .ok_or_else(out_of_range)?;
        }
        if negative {
            mantissa = -mantissa;
        }

        let fractional_len = i32::try_from(fractional.len()).map_err(|_| out_of_range())?;
        let exponent = scale
            .decimal
            .checked_sub(fractional_len)
            .ok_or_else(out_of_range)?;

        Self::canonical(mantissa, exponent).ok_or_else(out_of_range)
    }
}
