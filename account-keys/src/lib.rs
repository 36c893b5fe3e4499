// Copyright (c) 2025 The Vela Foundation

//! Vela account keys.
//!
//! A Vela account is defined by a pair of private keys `(v, s)` used for
//! identifying owned outputs and spending them, respectively. Senders are
//! given the public pair `(V, S)` and derive a fresh one-time address per
//! output, so the chain never carries `(V, S)` itself.
//!
//! An account owner may also delegate output detection without delegating
//! spend authority by issuing a [`ScopedViewKey`], which carries the view
//! private key and a block-index window in which it is honored.

#![no_std]
#![deny(missing_docs)]

extern crate alloc;

#[cfg(test)]
extern crate std;

use core::{
    fmt,
    hash::{Hash, Hasher},
};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use vela_crypto_keys::{RistrettoPrivate, RistrettoPublic};
use vela_crypto_ring_signature::onetime_keys::{
    recover_onetime_private_key, view_key_matches_output,
};
use vela_util_from_random::FromRandom;
use zeroize::Zeroize;

/// A Vela user's public address: the view and spend public keys shared with
/// senders.
#[derive(Clone, Copy, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PublicAddress {
    /// The public view key `V`.
    view_public_key: RistrettoPublic,

    /// The public spend key `S`.
    spend_public_key: RistrettoPublic,
}

impl PublicAddress {
    /// Create a new public address from a view and spend public key pair.
    #[inline]
    pub fn new(spend_public_key: &RistrettoPublic, view_public_key: &RistrettoPublic) -> Self {
        Self {
            view_public_key: *view_public_key,
            spend_public_key: *spend_public_key,
        }
    }

    /// Get the public view key.
    pub fn view_public_key(&self) -> &RistrettoPublic {
        &self.view_public_key
    }

    /// Get the public spend key.
    pub fn spend_public_key(&self) -> &RistrettoPublic {
        &self.spend_public_key
    }
}

impl fmt::Display for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "VLA")?;
        for byte in self
            .spend_public_key
            .to_bytes()
            .iter()
            .chain(self.view_public_key.to_bytes().iter())
        {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for PublicAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PublicAddress({self})")
    }
}

impl FromRandom for PublicAddress {
    fn from_random<T: RngCore + CryptoRng>(rng: &mut T) -> Self {
        PublicAddress::new(
            &RistrettoPublic::from_random(rng),
            &RistrettoPublic::from_random(rng),
        )
    }
}

/// A complete account key: the pair of private keys. This should only ever
/// be present in client code.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct AccountKey {
    /// Private key `v` used for view-key matching.
    view_private_key: RistrettoPrivate,

    /// Private key `s` used for spending.
    spend_private_key: RistrettoPrivate,
}

// Hash, Eq are implemented in terms of the public address because we don't
// want comparisons to leak private key details over side-channels.
impl Hash for AccountKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.public_address().hash(state)
    }
}

impl Eq for AccountKey {}

impl PartialEq for AccountKey {
    fn eq(&self, other: &Self) -> bool {
        self.public_address().eq(&other.public_address())
    }
}

impl fmt::Debug for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AccountKey(<redacted>)")
    }
}

impl AccountKey {
    /// Create an account key from its private view and spend keys.
    pub fn new(spend_private_key: &RistrettoPrivate, view_private_key: &RistrettoPrivate) -> Self {
        Self {
            view_private_key: view_private_key.clone(),
            spend_private_key: spend_private_key.clone(),
        }
    }

    /// The private view key `v`.
    pub fn view_private_key(&self) -> &RistrettoPrivate {
        &self.view_private_key
    }

    /// The private spend key `s`.
    pub fn spend_private_key(&self) -> &RistrettoPrivate {
        &self.spend_private_key
    }

    /// The account's public address `(V, S)`.
    pub fn public_address(&self) -> PublicAddress {
        PublicAddress::new(
            &RistrettoPublic::from(&self.spend_private_key),
            &RistrettoPublic::from(&self.view_private_key),
        )
    }

    /// Returns true if the output with the given target and tx public keys
    /// belongs to this account.
    pub fn owns_output(
        &self,
        onetime_public_key: &RistrettoPublic,
        tx_public_key: &RistrettoPublic,
    ) -> bool {
        view_key_matches_output(
            &self.view_private_key,
            onetime_public_key,
            tx_public_key,
            &RistrettoPublic::from(&self.spend_private_key),
        )
    }

    /// Recover the one-time private key for an output sent to this account.
    pub fn recover_onetime_private_key(
        &self,
        tx_public_key: &RistrettoPublic,
    ) -> RistrettoPrivate {
        recover_onetime_private_key(
            tx_public_key,
            &self.view_private_key,
            &self.spend_private_key,
        )
    }

    /// Issue a scoped view key honored for block indices in
    /// `[valid_from, valid_until]` inclusive.
    pub fn scoped_view_key(&self, valid_from: u64, valid_until: u64) -> ScopedViewKey {
        ScopedViewKey {
            view_private_key: self.view_private_key.clone(),
            spend_public_key: RistrettoPublic::from(&self.spend_private_key),
            valid_from,
            valid_until,
        }
    }
}

impl FromRandom for AccountKey {
    fn from_random<T: RngCore + CryptoRng>(rng: &mut T) -> Self {
        Self::new(
            &RistrettoPrivate::from_random(rng),
            &RistrettoPrivate::from_random(rng),
        )
    }
}

/// A view key delegated to a third party, restricted to a window of block
/// indices.
///
/// The holder can detect outputs belonging to the issuing account, but only
/// for outputs appearing in blocks inside the window, and can never spend.
#[derive(Clone, Deserialize, Serialize, Zeroize)]
#[zeroize(drop)]
pub struct ScopedViewKey {
    /// The account's private view key `v`.
    view_private_key: RistrettoPrivate,

    /// The account's public spend key `S`, needed to recompute one-time keys.
    #[zeroize(skip)]
    spend_public_key: RistrettoPublic,

    /// First block index at which this key is honored.
    valid_from: u64,

    /// Last block index at which this key is honored, inclusive.
    valid_until: u64,
}

impl ScopedViewKey {
    /// The account's private view key, used to derive shared secrets for
    /// outputs inside the window.
    pub fn view_private_key(&self) -> &RistrettoPrivate {
        &self.view_private_key
    }

    /// The account's public spend key.
    pub fn spend_public_key(&self) -> &RistrettoPublic {
        &self.spend_public_key
    }

    /// First block index of the window.
    pub fn valid_from(&self) -> u64 {
        self.valid_from
    }

    /// Last block index of the window, inclusive.
    pub fn valid_until(&self) -> u64 {
        self.valid_until
    }

    /// Returns true if this key is honored at `block_index`.
    pub fn is_valid_at(&self, block_index: u64) -> bool {
        self.valid_from <= block_index && block_index <= self.valid_until
    }

    /// Returns true if the output in a block at `block_index` belongs to the
    /// issuing account, or false if the window excludes the block.
    pub fn matches_output(
        &self,
        onetime_public_key: &RistrettoPublic,
        tx_public_key: &RistrettoPublic,
        block_index: u64,
    ) -> bool {
        if !self.is_valid_at(block_index) {
            return false;
        }
        view_key_matches_output(
            &self.view_private_key,
            onetime_public_key,
            tx_public_key,
            &self.spend_public_key,
        )
    }
}

impl fmt::Debug for ScopedViewKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ScopedViewKey(<redacted>, blocks {}..={})",
            self.valid_from, self.valid_until
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_crypto_ring_signature::onetime_keys::{
        create_onetime_public_key, create_tx_public_key,
    };
    use vela_util_test_helper::run_with_several_seeds;

    // Write an output to `recipient` and return its (target, tx public) keys.
    fn send_to(
        recipient: &PublicAddress,
        rng: &mut impl rand_core::CryptoRngCore,
    ) -> (RistrettoPublic, RistrettoPublic) {
        let tx_private_key = RistrettoPrivate::from_random(rng);
        let tx_public_key = create_tx_public_key(&tx_private_key);
        let onetime_public_key = create_onetime_public_key(
            &tx_private_key,
            recipient.view_public_key(),
            recipient.spend_public_key(),
        );
        (onetime_public_key, tx_public_key)
    }

    #[test]
    fn test_account_owns_its_outputs() {
        run_with_several_seeds(|mut rng| {
            let account = AccountKey::from_random(&mut rng);
            let other = AccountKey::from_random(&mut rng);

            let (target, tx_public) = send_to(&account.public_address(), &mut rng);

            assert!(account.owns_output(&target, &tx_public));
            assert!(!other.owns_output(&target, &tx_public));
        });
    }

    #[test]
    fn test_recovered_key_spends_onetime_address() {
        run_with_several_seeds(|mut rng| {
            let account = AccountKey::from_random(&mut rng);
            let (target, tx_public) = send_to(&account.public_address(), &mut rng);

            let onetime_private = account.recover_onetime_private_key(&tx_public);
            assert_eq!(RistrettoPublic::from(&onetime_private), target);
        });
    }

    #[test]
    fn test_scoped_view_key_window() {
        run_with_several_seeds(|mut rng| {
            let account = AccountKey::from_random(&mut rng);
            let scoped = account.scoped_view_key(100, 200);

            let (target, tx_public) = send_to(&account.public_address(), &mut rng);

            // Inside the window, including both endpoints.
            assert!(scoped.matches_output(&target, &tx_public, 100));
            assert!(scoped.matches_output(&target, &tx_public, 150));
            assert!(scoped.matches_output(&target, &tx_public, 200));

            // Outside the window.
            assert!(!scoped.matches_output(&target, &tx_public, 99));
            assert!(!scoped.matches_output(&target, &tx_public, 201));
        });
    }

    #[test]
    fn test_scoped_view_key_rejects_foreign_outputs() {
        run_with_several_seeds(|mut rng| {
            let account = AccountKey::from_random(&mut rng);
            let other = AccountKey::from_random(&mut rng);
            let scoped = account.scoped_view_key(0, u64::MAX);

            let (target, tx_public) = send_to(&other.public_address(), &mut rng);

            assert!(!scoped.matches_output(&target, &tx_public, 50));
        });
    }
}
