//! Modular arithmetic
//!
//! This module provides the fixed-modulus integer primitives the proof engine
//! is built on.
//!
//! Key features:
//! - Square-and-multiply exponentiation (`mod_pow`)
//! - Multiplication widened to `u128`, so any `u64` modulus is overflow-free
//! - Euclidean reduction of signed values
//! - Primality check for parameter validation
//!
//! # Example
//!
//! ```rust
//! use compliance_fort::arith::mod_pow;
//!
//! assert_eq!(mod_pow(5, 7, 23), 17);
//! ```

/// Multiply two residues modulo `modulus`
///
/// The product is formed in `u128`, so it cannot overflow for any `u64` input.
pub fn mod_mul(a: u64, b: u64, modulus: u64) -> u64 {
    ((a as u128 * b as u128) % modulus as u128) as u64
}

/// Compute `base^exponent mod modulus`
///
/// Binary exponentiation: the exponent is halved each step, the base squared,
/// and the accumulator multiplied by the base whenever the low bit is set.
/// O(log exponent) multiplications.
///
/// # Arguments
/// * `base` - Base (reduced modulo `modulus` first)
/// * `exponent` - Non-negative exponent
/// * `modulus` - Modulus, must be at least 1
///
/// # Returns
/// Value in `[0, modulus)`; `0` when `modulus == 1`
///
/// # Example
/// ```
/// use compliance_fort::arith::mod_pow;
///
/// assert_eq!(mod_pow(5, 11, 23), 22);
/// assert_eq!(mod_pow(3, 0, 7), 1);
/// ```
pub fn mod_pow(base: u64, exponent: u64, modulus: u64) -> u64 {
    debug_assert!(modulus >= 1, "modulus must be positive");
    if modulus == 1 {
        return 0;
    }

    let mut result = 1u64;
    let mut b = base % modulus;
    let mut e = exponent;

    while e > 0 {
        if e & 1 == 1 {
            result = mod_mul(result, b, modulus);
        }
        b = mod_mul(b, b, modulus);
        e >>= 1;
    }

    result
}

/// Reduce a signed value into `[0, modulus)`
///
/// Euclidean reduction: negative inputs wrap to the positive residue.
pub fn reduce_signed(value: i64, modulus: u64) -> u64 {
    (value as i128).rem_euclid(modulus as i128) as u64
}

/// Check whether `n` is prime
///
/// Trial division up to `sqrt(n)`. Only used when validating group parameters,
/// where `n` fits in an `i32`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut d = 3u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow_small_group() {
        // Powers of 5 modulo 23
        assert_eq!(mod_pow(5, 0, 23), 1);
        assert_eq!(mod_pow(5, 1, 23), 5);
        assert_eq!(mod_pow(5, 2, 23), 2);
        assert_eq!(mod_pow(5, 7, 23), 17);
        assert_eq!(mod_pow(5, 11, 23), 22);
        assert_eq!(mod_pow(5, 22, 23), 1);
    }

    #[test]
    fn test_mod_pow_modulus_one() {
        assert_eq!(mod_pow(5, 3, 1), 0);
        assert_eq!(mod_pow(0, 0, 1), 0);
    }

    #[test]
    fn test_mod_pow_reduces_base() {
        assert_eq!(mod_pow(28, 7, 23), mod_pow(5, 7, 23));
    }

    #[test]
    fn test_mod_pow_matches_naive() {
        for base in 0..30u64 {
            for exp in 0..40u64 {
                let mut naive = 1u64;
                for _ in 0..exp {
                    naive = naive * base % 29;
                }
                assert_eq!(mod_pow(base, exp, 29), naive, "{}^{} mod 29", base, exp);
            }
        }
    }

    #[test]
    fn test_mod_pow_large_modulus() {
        // Fermat: a^(p-1) = 1 mod p for the Mersenne prime 2^61 - 1
        let p = (1u64 << 61) - 1;
        assert_eq!(mod_pow(123_456_789, p - 1, p), 1);
        assert_eq!(mod_pow(p - 1, 2, p), 1);
    }

    #[test]
    fn test_reduce_signed() {
        assert_eq!(reduce_signed(-38, 22), 6);
        assert_eq!(reduce_signed(122, 23), 7);
        assert_eq!(reduce_signed(0, 5), 0);
        assert_eq!(reduce_signed(i64::MIN, 23), (i64::MIN as i128).rem_euclid(23) as u64);
    }

    #[test]
    fn test_is_prime() {
        let primes = [2u64, 3, 5, 7, 11, 13, 23, 101, 7919, 2_147_483_647];
        for p in primes {
            assert!(is_prime(p), "{} should be prime", p);
        }
        let composites = [0u64, 1, 4, 9, 15, 21, 25, 7917];
        for c in composites {
            assert!(!is_prime(c), "{} should not be prime", c);
        }
    }
}
