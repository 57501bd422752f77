//! # Synthesis Rules
//!
//! Deterministic generation of an access code from a payment identifier.
//!
//! Layout: `AC-<ref>-<suffix>`
//!
//! - `ref` is the uppercased alphanumeric content of the payment id,
//!   right-padded from the digest up to the 8-character minimum.
//! - `suffix` is the first 12 hex characters (uppercased) of
//!   `SHA-256(payment_id ":" email)`.
//!
//! The same `(payment_id, email)` pair therefore mints the same code in
//! every session reading the same store, which is what makes redundant
//! verification calls safe (see pg-03).

use sha2::{Digest, Sha256};
use shared_types::{AccessCode, ACCESS_CODE_PREFIX, MIN_REF_LEN};

/// Length of the synthesized suffix segment (>= the 9-character minimum).
const SUFFIX_LEN: usize = 12;

/// Synthesize the access code bound to `payment_id`.
///
/// Returns `None` only for an empty/whitespace payment id; any other input
/// produces a well-formed code.
#[must_use]
pub fn synthesize_code(payment_id: &str, email: Option<&str>) -> Option<AccessCode> {
    let payment_id = payment_id.trim();
    if payment_id.is_empty() {
        return None;
    }

    let digest = Sha256::new()
        .chain_update(payment_id.as_bytes())
        .chain_update(b":")
        .chain_update(email.unwrap_or_default().as_bytes())
        .finalize();
    let digest_hex = hex::encode_upper(digest);

    let mut reference: String = payment_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    for c in digest_hex.chars() {
        if reference.len() >= MIN_REF_LEN {
            break;
        }
        reference.push(c);
    }

    let suffix = &digest_hex[..SUFFIX_LEN];

    AccessCode::parse(&format!("{ACCESS_CODE_PREFIX}-{reference}-{suffix}"))
}
