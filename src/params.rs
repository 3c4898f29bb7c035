//! Group parameters
//!
//! The cyclic group every proof lives in: a prime modulus and a generator.
//! Parameters are passed to the prover and verifier explicitly, so parameter
//! sets can differ per test or per deployment.
//!
//! A `GroupParams` value is always valid: the only ways to obtain one are
//! `GroupParams::new`, `Default` and deserialization, and the latter two go
//! through the same checks.

use crate::arith::is_prime;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Legacy field modulus
pub const PRIME: u64 = 23;

/// Legacy group generator
pub const GENERATOR: u64 = 5;

/// Prime modulus and generator of the proof group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGroupParams")]
pub struct GroupParams {
    prime: u64,
    generator: u64,
}

/// Unchecked wire form of `GroupParams`
#[derive(Deserialize)]
struct RawGroupParams {
    prime: u64,
    generator: u64,
}

impl TryFrom<RawGroupParams> for GroupParams {
    type Error = Error;

    fn try_from(raw: RawGroupParams) -> Result<Self> {
        GroupParams::new(raw.prime, raw.generator)
    }
}

impl GroupParams {
    /// Create validated group parameters
    ///
    /// # Arguments
    /// * `prime` - Modulus; must be prime and fit in an `i32`
    /// * `generator` - Generator; must lie in `(1, prime)`
    ///
    /// # Returns
    /// `Ok(GroupParams)` if valid, `Err(Error::InvalidParams)` otherwise
    pub fn new(prime: u64, generator: u64) -> Result<Self> {
        let params = Self { prime, generator };
        params.validate()?;
        Ok(params)
    }

    /// Check the parameter invariants
    ///
    /// Group elements are carried in `i32` message fields, so the modulus is
    /// capped at `i32::MAX`.
    pub fn validate(&self) -> Result<()> {
        if self.prime < 3 || self.prime > i32::MAX as u64 {
            return Err(Error::InvalidParams(format!(
                "prime {} outside [3, {}]",
                self.prime,
                i32::MAX
            )));
        }
        if !is_prime(self.prime) {
            return Err(Error::InvalidParams(format!(
                "modulus {} is not prime",
                self.prime
            )));
        }
        if self.generator <= 1 || self.generator >= self.prime {
            return Err(Error::InvalidParams(format!(
                "generator {} outside (1, {})",
                self.generator, self.prime
            )));
        }
        Ok(())
    }

    /// Field modulus
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Group generator
    pub fn generator(&self) -> u64 {
        self.generator
    }

    /// Exponent modulus (`prime - 1`)
    pub fn order(&self) -> u64 {
        self.prime - 1
    }
}

impl Default for GroupParams {
    fn default() -> Self {
        Self {
            prime: PRIME,
            generator: GENERATOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GroupParams::default();
        assert_eq!(params.prime(), 23);
        assert_eq!(params.generator(), 5);
        assert_eq!(params.order(), 22);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_composite_modulus() {
        assert!(matches!(
            GroupParams::new(21, 5),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn test_rejects_bad_generator() {
        assert!(GroupParams::new(23, 1).is_err());
        assert!(GroupParams::new(23, 23).is_err());
        assert!(GroupParams::new(23, 0).is_err());
    }

    #[test]
    fn test_rejects_oversized_modulus() {
        // 2^61 - 1 is prime but does not fit an i32 message field
        assert!(GroupParams::new((1u64 << 61) - 1, 3).is_err());
        assert!(GroupParams::new(2_147_483_647, 7).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let params: GroupParams =
            serde_json::from_str(r#"{"prime": 101, "generator": 2}"#).unwrap();
        assert_eq!(params, GroupParams::new(101, 2).unwrap());

        assert!(serde_json::from_str::<GroupParams>(r#"{"prime": 0, "generator": 5}"#).is_err());
        assert!(serde_json::from_str::<GroupParams>(r#"{"prime": 24, "generator": 5}"#).is_err());
        assert!(
            serde_json::from_str::<GroupParams>(r#"{"prime": 4294967311, "generator": 3}"#)
                .is_err()
        );
    }

    #[test]
    fn test_serialize_round_trip_keeps_field_names() {
        let json = serde_json::to_value(GroupParams::default()).unwrap();
        assert_eq!(json, serde_json::json!({"prime": 23, "generator": 5}));
    }
}
