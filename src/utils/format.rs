//! Display Formatting
//!
//! Turns raw numbers into the strings shown on the dashboard. Three modes:
//! - `price`: `65,000.00`
//! - `value`: `$2.50B`, `$13.40M`, `$7.10K`, `$500.00`
//! - `regular`: `1,234,567.89000000` (BTC precision)
//!
//! Formatting never fails: malformed input renders as [`FALLBACK`].

use std::fmt;
use std::str::FromStr;
use tracing::error;

/// Rendered in place of anything that is not a usable number
pub const FALLBACK: &str = "0.00";

const BILLION: f64 = 1_000_000_000.0;
const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Format mode for [`format_number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatMode {
    /// Two decimals, thousands grouped
    Price,
    /// Dollar amount abbreviated to B/M/K
    Value,
    /// Eight decimals, thousands grouped
    #[default]
    Regular,
}

impl FromStr for FormatMode {
    type Err = std::convert::Infallible;

    /// Unknown names fall through to `Regular`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "price" => FormatMode::Price,
            "value" => FormatMode::Value,
            _ => FormatMode::Regular,
        })
    }
}

impl fmt::Display for FormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatMode::Price => "price",
            FormatMode::Value => "value",
            FormatMode::Regular => "regular",
        };
        f.write_str(name)
    }
}

/// Format a number for display
pub fn format_number(value: f64, mode: FormatMode) -> String {
    if !value.is_finite() {
        error!("Error formatting number {} ({}): not a finite value", value, mode);
        return FALLBACK.to_string();
    }

    match mode {
        FormatMode::Price => group_thousands(&format!("{:.2}", value)),
        FormatMode::Value => {
            if value >= BILLION {
                format!("${:.2}B", value / BILLION)
            } else if value >= MILLION {
                format!("${:.2}M", value / MILLION)
            } else if value >= THOUSAND {
                format!("${:.2}K", value / THOUSAND)
            } else {
                format!("${:.2}", value)
            }
        }
        FormatMode::Regular => group_thousands(&format!("{:.8}", value)),
    }
}

/// Format a raw textual number, e.g. a field an upstream sent as a string
pub fn format_number_str(raw: &str, mode: FormatMode) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) => format_number(value, mode),
        Err(e) => {
            error!("Error formatting number {:?} ({}): {}", raw, mode, e);
            FALLBACK.to_string()
        }
    }
}

/// Insert `,` every three digits of the integer part of a fixed-point string
fn group_thousands(fixed: &str) -> String {
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.insert(0, ',');
        }
        grouped.insert(0, c);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
