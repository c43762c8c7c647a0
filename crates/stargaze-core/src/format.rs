//! Compact number formatting for display ("1.2K", "3M").

const UNITS: [(u64, &str); 7] = [
    (1_000_000_000_000_000_000, "E"),
    (1_000_000_000_000_000, "P"),
    (1_000_000_000_000, "T"),
    (1_000_000_000, "G"),
    (1_000_000, "M"),
    (1_000, "K"),
    (1, ""),
];

/// Format `n` with the largest unit it reaches, rounded to `digits`
/// decimals, trailing zeros dropped. `0` renders as `"0"`.
pub fn format_compact(n: u64, digits: usize) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let (value, symbol) = UNITS
        .iter()
        .find(|(v, _)| n >= *v)
        .copied()
        .unwrap_or((1, ""));

    let mut s = format!("{:.*}", digits, n as f64 / value as f64);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    s.push_str(symbol);
    s
}
