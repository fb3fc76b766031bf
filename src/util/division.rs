//! Size division grammar
//!
//! A division string is a comma-separated list of byte thresholds such as
//! `10gb,1gb,500b`. Each token is `<number><unit>` where the unit is one of
//! `gb`, `mb`, `kb` or `b`, matched case-insensitively.

use crate::error::{DivisionError, DivisionFault};

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

/// Parse a division string into byte thresholds, in input order.
///
/// An empty (or all-whitespace) input yields no thresholds.
pub fn parse_divisions(input: &str) -> Result<Vec<u64>, DivisionError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input.split(',').map(parse_token).collect()
}

fn parse_token(raw: &str) -> Result<u64, DivisionError> {
    let raw = raw.trim();
    let fail = |reason| DivisionError::InvalidDivision {
        token: raw.to_string(),
        reason,
    };

    let token = raw.to_ascii_lowercase();
    let bytes = token.as_bytes();
    if bytes.len() < 2 {
        return Err(fail(DivisionFault::TooShort));
    }
    if bytes[bytes.len() - 1] != b'b' {
        return Err(fail(DivisionFault::MissingSuffix));
    }

    // The character before the trailing `b` selects between the two-letter
    // units and plain bytes.
    let (literal, multiplier) = match bytes[bytes.len() - 2] {
        b'g' => (&token[..token.len() - 2], GB),
        b'm' => (&token[..token.len() - 2], MB),
        b'k' => (&token[..token.len() - 2], KB),
        b'0'..=b'9' => (&token[..token.len() - 1], 1),
        _ => return Err(fail(DivisionFault::UnknownUnit)),
    };
    if literal.is_empty() {
        return Err(fail(DivisionFault::EmptyNumber));
    }

    let value = scale_decimal(literal, multiplier).map_err(fail)?;
    if value >= u64::MAX as u128 {
        return Err(fail(DivisionFault::TooLarge));
    }
    Ok(value as u64)
}

/// Multiply a decimal literal by `multiplier`, truncating toward zero.
///
/// Works on decimal digits, so `1.5gb` is exactly 1610612736.
fn scale_decimal(literal: &str, multiplier: u64) -> Result<u128, DivisionFault> {
    let (int_part, frac_part) = match literal.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (literal, ""),
    };
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if int_part.len() + frac_part.len() == 0 || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(DivisionFault::MalformedNumber);
    }

    // Little-endian digit vector of int_part ++ frac_part.
    let mut digits: Vec<u64> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .rev()
        .map(|b| u64::from(b - b'0'))
        .collect();

    let mut carry = 0u64;
    for digit in digits.iter_mut() {
        let product = *digit * multiplier + carry;
        *digit = product % 10;
        carry = product / 10;
    }
    while carry > 0 {
        digits.push(carry % 10);
        carry /= 10;
    }

    // Dropping the fractional digits truncates toward zero.
    let mut value = 0u128;
    for &digit in digits.iter().skip(frac_part.len()).rev() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or(DivisionFault::TooLarge)?;
    }
    Ok(value)
}

/// A threshold list, sorted descending once at construction and never
/// mutated afterwards. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Divisions(Vec<u64>);

impl Divisions {
    /// Parse a division string and sort the result descending.
    pub fn parse(input: &str) -> Result<Self, DivisionError> {
        parse_divisions(input).map(Self::from_thresholds)
    }

    pub fn from_thresholds(mut thresholds: Vec<u64>) -> Self {
        thresholds.sort_unstable_by(|a, b| b.cmp(a));
        Self(thresholds)
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}
