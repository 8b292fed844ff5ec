/// Formats an optional f64 to 4 decimal places, or returns "—" if None or non-finite.
pub fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "—".to_owned(),
    }
}

/// Formats a count with its share of `total` as a percentage.
pub fn fmt_share(count: usize, total: usize) -> String {
    if total == 0 {
        return format!("{count} (—)");
    }
    let pct = count as f64 / total as f64 * 100.0;
    format!("{count} ({pct:.1}%)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_opt() {
        assert_eq!(fmt_opt(Some(1.5)), "1.5000");
        assert_eq!(fmt_opt(Some(f64::NAN)), "—");
        assert_eq!(fmt_opt(None), "—");
    }

    #[test]
    fn test_fmt_share() {
        assert_eq!(fmt_share(1, 4), "1 (25.0%)");
        assert_eq!(fmt_share(0, 0), "0 (—)");
    }
}
