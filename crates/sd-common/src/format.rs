//! Display formatting shared by tables and reports.

/// Date portion of a backend timestamp (`2025-01-01T00:00:00Z` → `2025-01-01`).
pub fn date_part(raw: &str) -> &str {
    raw.split('T').next().unwrap_or(raw)
}

/// Format a won amount the way `ko-KR` currency formatting does (`₩1,500,000`).
///
/// Missing and zero amounts render as `-`.
pub fn format_krw(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(a) if a.is_finite() && a != 0.0 => a.round() as i64,
        _ => return "-".to_string(),
    };
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}₩{}", sign, group_thousands(amount.unsigned_abs()))
}

/// Insert `,` every three digits.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `-` for empty optional cells.
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}
