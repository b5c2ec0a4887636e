//! Shared scalar types used across the pipeline.

/// A 21-bit Unicode scalar value. All internal processing is code-point
/// based; byte positions are not preserved past the tokenizer.
pub type CodePoint = u32;

/// Converts a code point to a `char`, assuming it is a valid Unicode
/// scalar value (guaranteed for anything that reached us through
/// `str::chars`, and checked explicitly for table-derived data at load
/// time).
pub fn cp_to_char(cp: CodePoint) -> char {
    char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Renders a slice of code points as a `String`.
pub fn cps_to_string(cps: &[CodePoint]) -> String {
    cps.iter().copied().map(cp_to_char).collect()
}

/// Decomposes a `&str` into its code points.
pub fn str_to_cps(s: &str) -> Vec<CodePoint> {
    s.chars().map(|c| c as CodePoint).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_ascii_and_wide_chars() {
        let s = "hello\u{1F600}";
        let cps = str_to_cps(s);
        assert_eq!(cps_to_string(&cps), s);
    }
}
