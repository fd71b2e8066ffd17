//! Port input validation.

/// Parse user input as a port number in `0..=65535`.
///
/// Accepts an optional leading sign like any signed integer parser, but no
/// surrounding whitespace.
pub fn parse_port(input: &str) -> Option<u16> {
    let value: i64 = input.parse().ok()?;
    u16::try_from(value).ok()
}
