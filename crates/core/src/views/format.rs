//! Number formatting shared by the view models.

/// Format `value` with `decimals` fraction digits and `,` thousands separators.
/// Negative values keep their sign; `-0.00` is printed as `0.00`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Like `group_thousands` with `max_decimals`, then trailing zeros trimmed
/// back to at least `min_decimals` fraction digits.
pub fn format_amount(value: f64, min_decimals: usize, max_decimals: usize) -> String {
    let full = group_thousands(value, max_decimals);
    let Some(dot) = full.find('.') else {
        return full;
    };
    let keep_at_least = dot + 1 + min_decimals;
    let trimmed_len = full.trim_end_matches('0').len().max(keep_at_least);
    let mut out = full[..trimmed_len].to_string();
    if out.ends_with('.') {
        out.pop();
    }
    out
}

/// Dollar price: two decimals from $1 up, more precision for sub-dollar coins.
pub fn format_usd_price(value: f64) -> String {
    let body = if value.abs() >= 1.0 || value == 0.0 {
        group_thousands(value.abs(), 2)
    } else {
        format_amount(value.abs(), 2, 6)
    };
    with_dollar(value, body)
}

/// Whole-dollar amount: `$1,234,567`.
pub fn format_usd_whole(value: f64) -> String {
    with_dollar(value, group_thousands(value.abs(), 0))
}

/// Market-cap style abbreviation: `$1.23B`.
pub fn format_usd_billions(value: f64) -> String {
    format!("${:.2}B", value / 1e9)
}

/// `+2.34%` / `-1.20%`
pub fn format_signed_percent(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{pct:.2}%")
    } else {
        format!("{pct:.2}%")
    }
}

/// `↑ 2.34%` / `↓ 1.20%`
pub fn format_arrow_percent(pct: f64) -> String {
    let arrow = if pct >= 0.0 { '↑' } else { '↓' };
    format!("{arrow} {:.2}%", pct.abs())
}

fn with_dollar(value: f64, body: String) -> String {
    let is_zero = body.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-${body}")
    } else {
        format!("${body}")
    }
}
