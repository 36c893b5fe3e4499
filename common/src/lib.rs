// Copyright (c) 2025 The Vela Foundation

//! Types and utilities shared across Vela crates.

#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

/// A HashMap that works in no_std builds.
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;

/// A HashSet that works in no_std builds.
pub type HashSet<T> = hashbrown::HashSet<T>;

#[cfg(feature = "log")]
pub mod logger;
