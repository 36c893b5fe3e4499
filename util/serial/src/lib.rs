// Copyright (c) 2025 The Vela Foundation

//! Canonical serialization for Vela wire types.
//!
//! All transaction hashing, signing digests, ledger storage and propagation
//! payloads go through `encode`/`decode` so that every node computes the same
//! bytes for the same value. The wire encoding is CBOR.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use displaydoc::Display;
use serde::{de::DeserializeOwned, Serialize};

/// An error that occurred while encoding a value.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum EncodeError {
    /// The value could not be encoded as CBOR
    Cbor,
}

/// An error that occurred while decoding a value.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum DecodeError {
    /// The bytes are not valid CBOR for the target type
    Cbor,
}

/// Encode a value to canonical bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, EncodeError> {
    serde_cbor::to_vec(value).map_err(|_e| EncodeError::Cbor)
}

/// Decode a value from bytes previously produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    serde_cbor::from_slice(bytes).map_err(|_e| DecodeError::Cbor)
}

/// The length in bytes of the canonical encoding of a value.
pub fn encoded_len<T: Serialize>(value: &T) -> Result<usize, EncodeError> {
    Ok(encode(value)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::String, vec};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
    struct Thing {
        id: u64,
        name: String,
        bytes: Vec<u8>,
    }

    #[test]
    fn round_trip() {
        let thing = Thing {
            id: 7,
            name: String::from("seven"),
            bytes: vec![1, 2, 3],
        };
        let bytes = encode(&thing).unwrap();
        assert_eq!(bytes.len(), encoded_len(&thing).unwrap());
        let recovered: Thing = decode(&bytes).unwrap();
        assert_eq!(thing, recovered);
    }

    #[test]
    fn decode_garbage_fails() {
        let result: Result<Thing, _> = decode(&[0xff, 0x00, 0x13]);
        assert_eq!(result, Err(DecodeError::Cbor));
    }
}
