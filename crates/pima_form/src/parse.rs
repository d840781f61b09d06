/// Reads the leading number of a text input, the way a browser number field does.
///
/// Trailing garbage is ignored (`"12abc"` is 12) and input with no numeric
/// prefix reads as 0. A prefix too large for `f64` reads as infinity, which
/// every field's bounds reject.
pub fn parse_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let prefix_len = numeric_prefix_len(trimmed);
    (1..=prefix_len)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .unwrap_or(0.0)
}

// Only ASCII characters are accepted, so every index is a char boundary.
fn numeric_prefix_len(text: &str) -> usize {
    text.bytes()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count()
}
