//! Correlation identifiers linking all segments of one variant.
//!
//! The downstream system expects `2a, 2b, ..., 2z, 2A, ..., 2Z, 2aa, 2ab, ...`,
//! i.e., bijective base-52 numbering behind a fixed prefix.

const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Prefix of every per-variant identifier.
pub const PREFIX: &str = "2";

/// Correlation id of the summary segments in the tumor header.
///
/// Never collides with per-variant ids as those always start with `PREFIX`.
pub const SUMMARY_ID: &str = "1";

/// Return the correlation id for the variant at ranked position `idx`.
pub fn variant_id(idx: usize) -> String {
    let base = ALPHABET.len();
    let mut symbols = Vec::new();
    let mut n = Some(idx);
    while let Some(value) = n {
        symbols.push(ALPHABET[value % base] as char);
        n = (value / base).checked_sub(1);
    }
    symbols.reverse();

    let mut result = String::with_capacity(PREFIX.len() + symbols.len());
    result.push_str(PREFIX);
    result.extend(symbols);
    result
}
