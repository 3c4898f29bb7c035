//! C ABI entry points
//!
//! Symbols for foreign callers that load the `cdylib` and call these by name.
//! All of them use the legacy parameters, nonce and challenge. `Message` crosses the boundary by value or by pointer with its
//! `#[repr(C)]` layout.
//!
//! Output buffers are allocated by the caller and receive exactly `count`
//! entries. A null pointer or a non-positive `count` writes nothing.

use crate::proof::{self, Prover, Verifier};
use crate::types::Message;
use std::slice;

/// Create a proof for `(id, data)`
#[no_mangle]
pub extern "C" fn create_zk_proof(id: i32, data: i32, secret_key: i32, public_key: i32) -> Message {
    proof::create_zk_proof(id, data, secret_key, public_key)
}

/// Verify `*message` against `public_key`
///
/// # Safety
/// `message` must be null or point to a valid `Message`.
#[no_mangle]
pub unsafe extern "C" fn verify_zk_proof(message: *const Message, public_key: i32) -> bool {
    match message.as_ref() {
        Some(msg) => proof::verify_zk_proof(msg, public_key),
        None => false,
    }
}

/// Derive the public key for `secret_key`
#[no_mangle]
pub extern "C" fn generate_public_key(secret_key: i32) -> i32 {
    proof::generate_public_key(secret_key)
}

/// Verify `count` messages, writing one result per message
///
/// # Safety
/// `messages` must point to `count` readable messages, `results` to `count`
/// writable bools and `valid_count` to one writable `i32`. Each may be null.
#[no_mangle]
pub unsafe extern "C" fn batch_verify(
    messages: *const Message,
    count: i32,
    public_key: i32,
    valid_count: *mut i32,
    results: *mut bool,
) {
    if !valid_count.is_null() {
        *valid_count = 0;
    }
    if messages.is_null() || results.is_null() || count <= 0 {
        return;
    }

    let count = count as usize;
    let messages = slice::from_raw_parts(messages, count);
    let results = slice::from_raw_parts_mut(results, count);

    let outcome = proof::batch_verify(&Verifier::default(), messages, public_key);
    results.copy_from_slice(&outcome.results);

    if !valid_count.is_null() {
        *valid_count = outcome.valid_count as i32;
    }
}

/// Create `count` proofs from parallel `ids` / `data` arrays
///
/// # Safety
/// `ids` and `data` must point to `count` readable `i32`s and `out` to
/// `count` writable messages.
#[no_mangle]
pub unsafe extern "C" fn batch_create(
    ids: *const i32,
    data: *const i32,
    count: i32,
    secret_key: i32,
    public_key: i32,
    out: *mut Message,
) {
    if ids.is_null() || data.is_null() || out.is_null() || count <= 0 {
        return;
    }

    let count = count as usize;
    let ids = slice::from_raw_parts(ids, count);
    let data = slice::from_raw_parts(data, count);
    let out = slice::from_raw_parts_mut(out, count);

    // Both slices have `count` entries, so the length check cannot fail
    if let Ok(messages) = proof::batch_create(&Prover::default(), ids, data, secret_key, public_key) {
        out.copy_from_slice(&messages);
    }
}
