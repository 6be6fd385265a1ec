//! Input normalization for surrogate keys and TTL values

/// Strip every character outside `[a-zA-Z0-9_-]` from a surrogate key.
///
/// Remaining characters keep their relative order. Never fails; an empty
/// input yields an empty output.
pub fn sanitize_surrogate_key(key: &str) -> String {
    key.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Coerce textual TTL input to a non-negative number of seconds.
///
/// Leading whitespace and a sign are skipped, then leading digits are read;
/// anything unparseable is `0`. Overflow saturates. Whether a zero result
/// should still be applied is the caller's decision; see
/// `Service::set_ttl_from_text`.
pub fn coerce_seconds(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let unsigned = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);

    unsigned
        .chars()
        .take_while(char::is_ascii_digit)
        .fold(0u64, |acc, c| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(c.to_digit(10).unwrap_or(0)))
        })
}
