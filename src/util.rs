//! Random test-data helpers
//!
//! Used by the store and gateway tests to generate distinct owners, amounts,
//! and currencies per run.

use rand::Rng;

use crate::models::Currency;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Random integer in `[min, max]` inclusive.
pub fn random_int(min: i64, max: i64) -> i64 {
    rand::thread_rng().gen_range(min..=max)
}

/// Random lowercase string of length `n`.
pub fn random_string(n: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..n)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Random account owner name.
pub fn random_owner() -> String {
    random_string(6)
}

/// Random money amount in the smallest currency unit.
pub fn random_money() -> i64 {
    random_int(0, 1000)
}

/// Random supported currency.
pub fn random_currency() -> Currency {
    let idx = rand::thread_rng().gen_range(0..Currency::ALL.len());
    Currency::ALL[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_int_bounds() {
        for _ in 0..100 {
            let v = random_int(5, 9);
            assert!((5..=9).contains(&v));
        }
    }

    #[test]
    fn test_random_string_length_and_charset() {
        let s = random_string(12);
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_random_currency_is_supported() {
        for _ in 0..20 {
            let c = random_currency();
            assert!(Currency::ALL.contains(&c));
        }
    }
}
