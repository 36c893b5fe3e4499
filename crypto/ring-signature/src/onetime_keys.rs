// Copyright (c) 2025 The Vela Foundation

//! One-time keys, for stealth addressing.
//!
//! Senders derive a unique one-time address for each output so that
//! observers cannot link outputs to a recipient's published address. The
//! recipient's address is a pair of Ristretto points `(V, S)`, the view and
//! spend public keys. To send to `(V, S)`, the sender draws a fresh
//! transaction private key `r` and writes
//!
//! ```text
//!    tx_public_key     R = r * G
//!    onetime target    P = Hs(r * V) * G + S
//! ```
//!
//! where `Hs` denotes hashing to a scalar. The recipient scans with the view
//! private key `v`, recomputing `Hs(v * R) * G + S` for each output; only the
//! intended recipient can produce the matching one-time private key
//! `x = Hs(v * R) + s` from the spend private key `s`.

use crate::domain_separators::ONETIME_KEY_HASH_DOMAIN_TAG;
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT, ristretto::RistrettoPoint, scalar::Scalar,
};
use vela_crypto_hashes::{Blake2b512, Digest};
use vela_crypto_keys::{RistrettoPrivate, RistrettoPublic};

/// Hash a shared secret point to a scalar: `Hs(point)`.
fn hash_to_scalar(shared_secret: &RistrettoPublic) -> Scalar {
    let mut hasher = Blake2b512::new();
    hasher.update(ONETIME_KEY_HASH_DOMAIN_TAG);
    hasher.update(shared_secret.to_bytes());
    Scalar::from_hash(hasher)
}

/// The shared secret `a * B` of a Diffie-Hellman key exchange.
///
/// # Arguments
/// * `public_key` - The other party's public key `B`.
/// * `private_key` - Our private key `a`.
pub fn create_shared_secret(
    public_key: &RistrettoPublic,
    private_key: &RistrettoPrivate,
) -> RistrettoPublic {
    RistrettoPublic::from(private_key.as_ref() * public_key.as_ref())
}

/// The per-output transaction public key `R = r * G`.
pub fn create_tx_public_key(tx_private_key: &RistrettoPrivate) -> RistrettoPublic {
    RistrettoPublic::from(tx_private_key)
}

/// The one-time public key `P = Hs(r * V) * G + S` for an output sent to the
/// address with view public key `V` and spend public key `S`.
///
/// # Arguments
/// * `tx_private_key` - The transaction private key `r`.
/// * `view_public_key` - The recipient's view public key `V`.
/// * `spend_public_key` - The recipient's spend public key `S`.
pub fn create_onetime_public_key(
    tx_private_key: &RistrettoPrivate,
    view_public_key: &RistrettoPublic,
    spend_public_key: &RistrettoPublic,
) -> RistrettoPublic {
    // `Hs(r * V)`
    let hs = hash_to_scalar(&create_shared_secret(view_public_key, tx_private_key));

    let point: RistrettoPoint = hs * RISTRETTO_BASEPOINT_POINT + spend_public_key.as_ref();
    RistrettoPublic::from(point)
}

/// Returns true if the output with the given target and tx public keys was
/// sent to the address whose view private key is `view_private_key`.
///
/// This requires the spend public key but not the spend private key, so a
/// view-only scanner can detect ownership without being able to spend.
///
/// # Arguments
/// * `view_private_key` - The recipient's view private key `v`.
/// * `onetime_public_key` - The output's target key `P`.
/// * `tx_public_key` - The output's transaction public key `R`.
/// * `spend_public_key` - The recipient's spend public key `S`.
pub fn view_key_matches_output(
    view_private_key: &RistrettoPrivate,
    onetime_public_key: &RistrettoPublic,
    tx_public_key: &RistrettoPublic,
    spend_public_key: &RistrettoPublic,
) -> bool {
    // `Hs(v * R)`
    let hs = hash_to_scalar(&create_shared_secret(tx_public_key, view_private_key));

    let expected: RistrettoPoint = hs * RISTRETTO_BASEPOINT_POINT + spend_public_key.as_ref();
    *onetime_public_key == RistrettoPublic::from(expected)
}

/// The one-time private key `x = Hs(v * R) + s` for an output sent to us.
///
/// The returned key satisfies `x * G == onetime_public_key` when the output
/// was truly addressed to `(v * G, s * G)`.
///
/// # Arguments
/// * `tx_public_key` - The output's transaction public key `R`.
/// * `view_private_key` - The recipient's view private key `v`.
/// * `spend_private_key` - The recipient's spend private key `s`.
pub fn recover_onetime_private_key(
    tx_public_key: &RistrettoPublic,
    view_private_key: &RistrettoPrivate,
    spend_private_key: &RistrettoPrivate,
) -> RistrettoPrivate {
    // `Hs(v * R)`
    let hs = hash_to_scalar(&create_shared_secret(tx_public_key, view_private_key));

    let x: Scalar = hs + spend_private_key.as_ref();
    RistrettoPrivate::from(x)
}
