//! Small shared helpers.

/// Return "s" suffix for plural counts
///
/// - `plural_s(1)` -> `""` (1 plugin)
/// - `plural_s(3)` -> `"s"` (3 plugins)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format a count with its noun, pluralized
///
/// - `plural_count(1, "plugin")` -> `"1 plugin"`
/// - `plural_count(3, "plugin")` -> `"3 plugins"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}
