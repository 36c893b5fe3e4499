// Copyright (c) 2025 The Vela Foundation

//! Dandelion++ transaction propagation.
//!
//! Accepted transactions are first relayed along a random stem, one peer at
//! a time, and only later fluffed to the whole network, so that observers
//! correlating gossip timing cannot locate the originating node. See
//! "Dandelion++: Lightweight Cryptocurrency Networking with Formal Anonymity
//! Guarantees" (Fanti et al., 2018).

#![deny(missing_docs)]

mod config;
mod error;
mod messages;
mod router;

pub use config::{DandelionConfig, DandelionConfigBuilder};
pub use error::DandelionError;
pub use messages::{FluffBroadcast, StemForward};
pub use router::{DandelionRouter, PeerId, PropagationPhase, RelayDecision};
