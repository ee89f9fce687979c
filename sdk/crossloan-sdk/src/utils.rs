use crate::error::{CrossLoanError, Result};
use alloy_primitives::{Address, B256, U256};
use std::cmp::Ordering;

//=============================================================================
// Unit Conversion
//=============================================================================

/// Largest decimal count a `U256` amount can carry.
pub const MAX_DECIMALS: u8 = 77;

/// Convert a decimal string to smallest units.
///
/// Fractional digits beyond `decimals` are truncated. Signs other than a
/// leading `+` and any non-digit characters are rejected.
///
/// # Example
/// ```
/// use crossloan_sdk::parse_units;
/// use alloy_primitives::U256;
///
/// assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000u64));
/// ```
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(CrossLoanError::InvalidAmount("amount is empty".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(CrossLoanError::InvalidAmount(format!(
            "`{}` is negative",
            trimmed
        )));
    }
    if decimals > MAX_DECIMALS {
        return Err(CrossLoanError::InvalidAmount(format!(
            "{} decimals exceed the {} supported",
            decimals, MAX_DECIMALS
        )));
    }

    let Some((whole, fraction)) = split_decimal(trimmed) else {
        return Err(CrossLoanError::InvalidAmount(format!(
            "`{}` is not a decimal number",
            trimmed
        )));
    };

    let decimals = decimals as usize;
    let kept = &fraction[..fraction.len().min(decimals)];

    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    digits.push_str(kept);
    digits.extend(std::iter::repeat('0').take(decimals - kept.len()));

    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10).map_err(|e| {
        CrossLoanError::InvalidAmount(format!("`{}` does not fit in 256 bits: {}", trimmed, e))
    })
}

/// Render smallest units as a decimal string without trailing zeros.
pub fn format_units(raw: U256, decimals: u8) -> String {
    let digits = raw.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - digits.len()), digits)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Whole and fractional digits of an unsigned decimal, `None` when `amount`
/// is not one. A leading `+` and surrounding whitespace are accepted.
fn split_decimal(amount: &str) -> Option<(&str, &str)> {
    let trimmed = amount.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }
    Some((whole, fraction))
}

/// Significant digits only: no leading zeros in the whole part and no
/// trailing zeros in the fraction.
fn significant_digits(amount: &str) -> Option<(&str, &str)> {
    let (whole, fraction) = split_decimal(amount)?;
    Some((whole.trim_start_matches('0'), fraction.trim_end_matches('0')))
}

pub fn is_decimal(amount: &str) -> bool {
    split_decimal(amount).is_some()
}

/// True when `amount` is a decimal with at least one non-zero digit.
/// Works on the digits, so precision and magnitude are unbounded.
pub fn is_positive_decimal(amount: &str) -> bool {
    significant_digits(amount)
        .map(|(whole, fraction)| !whole.is_empty() || !fraction.is_empty())
        .unwrap_or(false)
}

/// Exact comparison of two decimal strings, `None` if either is malformed.
pub fn compare_decimals(lhs: &str, rhs: &str) -> Option<Ordering> {
    let (lhs_whole, lhs_fraction) = significant_digits(lhs)?;
    let (rhs_whole, rhs_fraction) = significant_digits(rhs)?;

    // without trailing zeros, fractions order lexicographically
    Some(
        lhs_whole
            .len()
            .cmp(&rhs_whole.len())
            .then_with(|| lhs_whole.cmp(rhs_whole))
            .then_with(|| lhs_fraction.cmp(rhs_fraction)),
    )
}

//=============================================================================
// Explorer Links
//=============================================================================

pub fn hex_hash(hash: &B256) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Lowercase 0x-prefixed address, the form explorers index by.
pub fn hex_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address))
}

/// `<explorer>/tx/<hash>`
pub fn tx_url(explorer_url: &str, tx_hash: &B256) -> String {
    format!("{}/tx/{}", explorer_url.trim_end_matches('/'), hex_hash(tx_hash))
}

/// `<explorer>/token/<token>?a=<holder>`, or the bare token page without a holder.
pub fn token_holder_url(explorer_url: &str, token: &Address, holder: Option<&Address>) -> String {
    let base = format!(
        "{}/token/{}",
        explorer_url.trim_end_matches('/'),
        hex_address(token)
    );
    match holder {
        Some(holder) => format!("{}?a={}", base, hex_address(holder)),
        None => base,
    }
}
