//! Duration strings used by the primitive catalog: `"400ms"`, `"1.2s"`, or a
//! bare number of milliseconds.

/// Parse a catalog duration into milliseconds. Returns `None` for malformed,
/// non-finite, or non-positive values.
pub fn parse_duration_ms(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let (number, scale) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1000.0)
    } else {
        (s, 1.0)
    };
    let value = number.trim().parse::<f64>().ok()? * scale;
    (value.is_finite() && value > 0.0).then_some(value)
}
