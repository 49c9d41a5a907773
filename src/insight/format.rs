/// Round to two decimal places, ties to even (`1.125` → `1.12`).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// `1234567.891` → `"1,234,567.89"`.
pub fn format_thousands(v: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, v.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && text.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Row counts and other integers with thousands separators.
pub fn format_count(n: usize) -> String {
    format_thousands(n as f64, 0)
}

/// Plain rendering for template slots: integral values print without a
/// fractional part (`120`), everything else uses the shortest form (`50.25`).
pub fn format_plain(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(50.254), 50.25);
        assert_eq!(round2(2.0 / 3.0), 0.67);
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(1.375), 1.38);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_thousands(999.0, 2), "999.00");
        assert_eq!(format_thousands(-12345.5, 2), "-12,345.50");
        assert_eq!(format_thousands(-0.001, 2), "0.00");
        assert_eq!(format_count(3420), "3,420");
        assert_eq!(format_count(0), "0");
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(120.0), "120");
        assert_eq!(format_plain(5.0), "5");
        assert_eq!(format_plain(50.25), "50.25");
        assert_eq!(format_plain(-3.0), "-3");
    }
}
