//! Display formatting for monetary and large numeric values.
//!
//! Aggregation keeps raw f64 sums; everything presentational happens here,
//! as stateless functions over a value plus a configuration.

/// Currency display configuration. The default matches the dashboard's
/// native convention: dollar symbol, comma grouping, whole units only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    pub fraction_digits: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_separator: ',',
            fraction_digits: 0,
        }
    }
}

impl CurrencyFormat {
    /// Renders `value` with grouped digits and the sign before the symbol:
    /// `-$1,234`.
    pub fn format(&self, value: f64) -> String {
        let magnitude = format!("{:.*}", self.fraction_digits, value.abs());
        let (int_part, frac_part) = match magnitude.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (magnitude.as_str(), None),
        };

        let mut out = String::new();
        if value < 0.0 {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_digits(int_part, self.thousands_separator));
        if let Some(frac_part) = frac_part {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Compact magnitude notation: millions as `"x.xM"`, thousands as `"x.xK"`,
/// anything smaller rendered plainly with `fraction_digits` decimals.
pub fn format_compact(value: f64, fraction_digits: usize) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.*}", fraction_digits, value)
    }
}
