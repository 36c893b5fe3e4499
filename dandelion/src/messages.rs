// Copyright (c) 2025 The Vela Foundation

//! Wire messages exchanged between peers during propagation.

use serde::{Deserialize, Serialize};
use vela_transaction_core::tx::Tx;

/// A stem-phase relay, sent to exactly one peer.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct StemForward {
    /// The transaction being relayed.
    pub tx: Tx,

    /// Number of stem hops the transaction has already taken.
    pub hops: u32,
}

/// A fluff-phase broadcast, sent to all connected peers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FluffBroadcast {
    /// The transaction being broadcast.
    pub tx: Tx,
}
