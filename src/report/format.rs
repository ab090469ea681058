/// en-US style number: comma thousands separators, at most three fraction
/// digits, trailing zeros dropped (`2500000` -> `2,500,000`, `1234.5678` ->
/// `1,234.568`).
pub fn format_amount(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-∞" } else { "∞" }.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortest plain rendering of a number (`180.0` -> `180`, `180.5` -> `180.5`).
pub fn format_plain(value: f64) -> String {
    format!("{value}")
}

/// Round half away from zero to an integer (`205.4` -> `205`, `205.5` -> `206`).
pub fn format_rounded(value: f64) -> String {
    format!("{}", value.round())
}

/// Probability in `[0, 1]` as a whole percentage.
pub fn format_percent(value: f64) -> String {
    format!("{}%", (value * 100.0).round())
}
