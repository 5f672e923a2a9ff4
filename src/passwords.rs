//! Random password suggestions shown to the user after a check.
//!
//! These come from the thread-local RNG and are meant for display only.
//! They are not suitable for key derivation or any other secret material.

use rand::seq::SliceRandom;

/// Characters a suggestion may contain: ASCII letters, digits and `!@#$%^&*`.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub const DEFAULT_LENGTH: usize = 12;
pub const DEFAULT_COUNT: usize = 10;

pub const MAX_LENGTH: usize = 128;
pub const MAX_COUNT: usize = 100;

/// Generate `count` passwords of exactly `length` characters, each character
/// drawn independently and uniformly from [`ALPHABET`].
pub fn generate(length: usize, count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            (0..length)
                .filter_map(|_| ALPHABET.choose(&mut rng).map(|&b| char::from(b)))
                .collect()
        })
        .collect()
}

/// Suggestions with the default shape (10 passwords of 12 characters).
pub fn generate_default() -> Vec<String> {
    generate(DEFAULT_LENGTH, DEFAULT_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shape() {
        let out = generate_default();
        assert_eq!(out.len(), DEFAULT_COUNT);
        assert!(out.iter().all(|p| p.len() == DEFAULT_LENGTH));
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate(12, 0).is_empty());
    }
}
