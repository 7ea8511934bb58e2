//! Text plotting of sample values.

/// A run of `ch` proportional to `value`, `width` characters at 1.0.
///
/// Negative and non-finite values draw nothing.
pub fn bar(value: f64, width: f64, ch: char) -> String {
    let len = (value * width).trunc();
    if !len.is_finite() || len <= 0.0 {
        return String::new();
    }
    std::iter::repeat(ch).take(len as usize).collect()
}
