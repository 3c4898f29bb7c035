//! Core types for proofs and messages
//!
//! This module defines the data structures shared by the proof engine, the
//! broker and the foreign-call boundary:
//! - `Message`: a proof-bearing record with a fixed C layout
//! - `KeyPair`: a secret key and its derived public key
//! - `BatchItem`: one `(id, data)` input to batch proof creation

use crate::arith::mod_pow;
use crate::params::GroupParams;
use serde::{Deserialize, Serialize};

/// Proof-bearing message
///
/// Five signed 32-bit fields in this exact order. The layout is shared with
/// foreign callers, so it must not change.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier within its source
    pub id: i32,

    /// Cleartext payload the proof attests to
    pub data: i32,

    /// Commitment `r`
    pub proof_r: i32,

    /// Response `s`
    pub proof_s: i32,

    /// Public key of the prover
    pub public_key: i32,
}

impl Message {
    /// Assemble a message from its raw fields
    ///
    /// Used to rebuild messages received over a wire for verification.
    pub fn new(id: i32, data: i32, proof_r: i32, proof_s: i32, public_key: i32) -> Self {
        Self {
            id,
            data,
            proof_r,
            proof_s,
            public_key,
        }
    }
}

/// Secret key with its public key
///
/// The secret key stays with the prover and is never copied into a `Message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    pub secret_key: i32,
    pub public_key: i32,
}

impl KeyPair {
    /// Derive the key pair for `secret_key` under `params`
    pub fn from_secret(params: &GroupParams, secret_key: i32) -> Self {
        Self {
            secret_key,
            public_key: derive_public_key(params, secret_key),
        }
    }
}

/// Compute `generator^secret_key mod prime`
///
/// The exponent is reduced modulo the group order first, which leaves
/// non-negative keys unchanged (Fermat) and gives negative keys a defined value.
///
/// # Example
/// ```
/// use compliance_fort::params::GroupParams;
/// use compliance_fort::types::derive_public_key;
///
/// assert_eq!(derive_public_key(&GroupParams::default(), 7), 17);
/// ```
pub fn derive_public_key(params: &GroupParams, secret_key: i32) -> i32 {
    let exponent = (secret_key as i64).rem_euclid(params.order() as i64) as u64;
    mod_pow(params.generator(), exponent, params.prime()) as i32
}

/// One element of a batch creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    pub id: i32,
    pub data: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_layout() {
        assert_eq!(std::mem::size_of::<Message>(), 20);
        assert_eq!(std::mem::align_of::<Message>(), 4);
    }

    #[test]
    fn test_message_json_field_names() {
        let msg = Message::new(1, 100, 22, 6, 17);
        let json = serde_json::to_value(msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1, "data": 100, "proof_r": 22, "proof_s": 6, "public_key": 17
            })
        );
    }

    #[test]
    fn test_keypair_from_secret() {
        let pair = KeyPair::from_secret(&GroupParams::default(), 7);
        assert_eq!(pair.secret_key, 7);
        assert_eq!(pair.public_key, 17);
    }

    #[test]
    fn test_derive_public_key_negative_secret() {
        let params = GroupParams::default();
        // -15 = 7 mod 22
        assert_eq!(derive_public_key(&params, -15), 17);
    }

    #[test]
    fn test_batch_item_deserialize() {
        let items: Vec<BatchItem> =
            serde_json::from_str(r#"[{"id": 1, "data": 10}, {"id": 2, "data": 20}]"#).unwrap();
        assert_eq!(items, vec![BatchItem { id: 1, data: 10 }, BatchItem { id: 2, data: 20 }]);
    }
}
