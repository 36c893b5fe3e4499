// Copyright (c) 2025 The Vela Foundation

//! The Dandelion++ propagation state machine.
//!
//! The router decides, for each accepted transaction, whether to forward it
//! along a stem to a single successor or to fluff it to all peers. It keeps
//! no network state beyond peer identities; timers are driven by the caller
//! passing in the current [`Instant`], which keeps every decision
//! deterministic under a seeded RNG.

use crate::{DandelionConfig, DandelionError};
use rand_core::RngCore;
use std::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use tracing::{debug, warn};
use vela_common::HashMap;
use vela_transaction_core::tx::{Tx, TxHash};

/// Opaque identifier of a connected peer.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PeerId(u64);

impl From<u64> for PeerId {
    fn from(src: u64) -> Self {
        Self(src)
    }
}

impl std::fmt::Display for PeerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "peer#{}", self.0)
    }
}

/// Where a transaction is in its propagation lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropagationPhase {
    /// Relayed along a single path to obscure the origin.
    Stem,
    /// Broadcast to all peers via epidemic gossip.
    Fluff,
    /// Broadcast complete. Terminal.
    Broadcasted,
}

impl PropagationPhase {
    /// Whether `next` is a legal transition from this phase.
    pub fn can_transition_to(self, next: PropagationPhase) -> bool {
        matches!(
            (self, next),
            (PropagationPhase::Stem, PropagationPhase::Fluff)
                | (PropagationPhase::Fluff, PropagationPhase::Broadcasted)
        )
    }
}

/// The router's verdict for one transaction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelayDecision {
    /// Forward to exactly this peer as a stem hop.
    Stem(PeerId),
    /// Broadcast to all peers.
    Fluff,
}

/// Stem successors for the current epoch.
///
/// Each inbound peer is pinned to one outbound successor for the whole
/// epoch, so an observer correlating stem traffic learns nothing from
/// repeated transactions within it.
struct SuccessorTable {
    peers: Vec<PeerId>,
    local_successor: Option<PeerId>,
    by_inbound: HashMap<PeerId, PeerId>,
    epoch_started_at: Instant,
}

/// A transaction we forwarded as a stem and expect to see again.
struct Embargo {
    tx: Tx,
    deadline: Instant,
}

/// Decides stem/fluff routing for accepted transactions.
pub struct DandelionRouter<R: RngCore> {
    config: DandelionConfig,
    successors: RwLock<SuccessorTable>,
    embargoes: Mutex<HashMap<TxHash, Embargo>>,
    rng: Mutex<R>,
}

impl<R: RngCore> DandelionRouter<R> {
    /// Creates a router over the given outbound peers.
    pub fn new(
        config: DandelionConfig,
        peers: Vec<PeerId>,
        mut rng: R,
        now: Instant,
    ) -> Result<Self, DandelionError> {
        config.validate()?;
        let local_successor = pick_successor(&peers, &mut rng);
        Ok(Self {
            config,
            successors: RwLock::new(SuccessorTable {
                peers,
                local_successor,
                by_inbound: HashMap::default(),
                epoch_started_at: now,
            }),
            embargoes: Mutex::new(HashMap::default()),
            rng: Mutex::new(rng),
        })
    }

    /// Routes a locally originated transaction.
    ///
    /// Local transactions always enter the stem phase; only the absence of
    /// outbound peers forces an immediate fluff.
    pub fn on_local_tx(&self, tx: &Tx, now: Instant) -> RelayDecision {
        let successor = self
            .successors
            .read()
            .expect("successor table poisoned")
            .local_successor;
        match successor {
            Some(peer) => {
                self.arm_embargo(tx, now);
                debug!(tx_hash = %tx.tx_hash(), %peer, "stemming local transaction");
                RelayDecision::Stem(peer)
            }
            None => RelayDecision::Fluff,
        }
    }

    /// Routes a stem transaction received from `from` after `hops` hops.
    ///
    /// Continues the stem with the configured probability; the hop ceiling
    /// forces a fluff regardless of the coin so a colluding path cannot stem
    /// forever or silently drop the transaction.
    pub fn on_stem_tx(&self, tx: &Tx, from: PeerId, hops: u32, now: Instant) -> RelayDecision {
        self.disarm_embargo(&tx.tx_hash());

        if hops >= self.config.max_stem_hops {
            debug!(tx_hash = %tx.tx_hash(), hops, "hop ceiling reached, fluffing");
            return RelayDecision::Fluff;
        }

        let coin = {
            let mut rng = self.rng.lock().expect("rng poisoned");
            unit_interval(&mut *rng)
        };
        if coin >= self.config.stem_probability {
            return RelayDecision::Fluff;
        }

        match self.successor_for(from) {
            Some(peer) => {
                self.arm_embargo(tx, now);
                RelayDecision::Stem(peer)
            }
            None => RelayDecision::Fluff,
        }
    }

    /// Marks a transaction as seen in fluff phase, disarming its embargo.
    pub fn record_seen(&self, tx_hash: &TxHash) {
        self.disarm_embargo(tx_hash);
    }

    /// Returns the transactions whose stem continuation was not observed in
    /// time. The caller must fluff them itself.
    pub fn poll_embargoes(&self, now: Instant) -> Vec<Tx> {
        let mut embargoes = self.embargoes.lock().expect("embargo map poisoned");
        let expired: Vec<TxHash> = embargoes
            .iter()
            .filter(|(_, embargo)| embargo.deadline <= now)
            .map(|(tx_hash, _)| *tx_hash)
            .collect();

        expired
            .iter()
            .filter_map(|tx_hash| {
                embargoes.remove(tx_hash).map(|embargo| {
                    warn!(%tx_hash, "stem relay timed out, fluffing locally");
                    embargo.tx
                })
            })
            .collect()
    }

    /// Re-derives the successor mapping if the epoch has elapsed.
    ///
    /// `peers` is the current set of outbound peers. Returns true if a
    /// rotation happened.
    pub fn maybe_rotate_epoch(&self, now: Instant, peers: &[PeerId]) -> bool {
        {
            let table = self.successors.read().expect("successor table poisoned");
            if now.duration_since(table.epoch_started_at) < self.config.epoch_duration() {
                return false;
            }
        }

        let mut table = self.successors.write().expect("successor table poisoned");
        // Re-check under the write lock; another caller may have rotated.
        if now.duration_since(table.epoch_started_at) < self.config.epoch_duration() {
            return false;
        }

        let mut rng = self.rng.lock().expect("rng poisoned");
        table.peers = peers.to_vec();
        table.local_successor = pick_successor(&table.peers, &mut *rng);
        table.by_inbound.clear();
        table.epoch_started_at = now;
        debug!(num_peers = peers.len(), "rotated stem successors");
        true
    }

    /// The current epoch's successor for transactions arriving from `from`,
    /// assigned on first use.
    fn successor_for(&self, from: PeerId) -> Option<PeerId> {
        {
            let table = self.successors.read().expect("successor table poisoned");
            if let Some(peer) = table.by_inbound.get(&from) {
                return Some(*peer);
            }
            if table.peers.is_empty() {
                return None;
            }
        }

        let mut table = self.successors.write().expect("successor table poisoned");
        if let Some(peer) = table.by_inbound.get(&from) {
            return Some(*peer);
        }
        let mut rng = self.rng.lock().expect("rng poisoned");
        let successor = pick_successor(&table.peers, &mut *rng)?;
        table.by_inbound.insert(from, successor);
        Some(successor)
    }

    fn arm_embargo(&self, tx: &Tx, now: Instant) {
        let mut embargoes = self.embargoes.lock().expect("embargo map poisoned");
        embargoes.insert(
            tx.tx_hash(),
            Embargo {
                tx: tx.clone(),
                deadline: now + self.config.embargo_timeout(),
            },
        );
    }

    fn disarm_embargo(&self, tx_hash: &TxHash) {
        let mut embargoes = self.embargoes.lock().expect("embargo map poisoned");
        embargoes.remove(tx_hash);
    }
}

fn pick_successor<R: RngCore>(peers: &[PeerId], rng: &mut R) -> Option<PeerId> {
    if peers.is_empty() {
        return None;
    }
    let index = (rng.next_u64() % peers.len() as u64) as usize;
    Some(peers[index])
}

/// A uniform draw from [0, 1) using the top 53 bits of a u64.
fn unit_interval<R: RngCore>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vela_transaction_core::{
        ring_ct::SignatureRctFull,
        tx::{Tx, TxPrefix},
    };
    use vela_util_test_helper::get_seeded_rng;

    /// An unsigned placeholder transaction. The router never inspects the
    /// signature, only the hash.
    fn test_tx(fee: u64) -> Tx {
        Tx {
            prefix: TxPrefix {
                inputs: Vec::new(),
                outputs: Vec::new(),
                fee,
                tombstone_block: 0,
            },
            signature: SignatureRctFull {
                ring_signatures: Vec::new(),
                pseudo_output_commitments: Vec::new(),
                range_proof_bytes: Vec::new(),
            },
        }
    }

    fn peers(n: u64) -> Vec<PeerId> {
        (0..n).map(PeerId::from).collect()
    }

    fn make_router(config: DandelionConfig, num_peers: u64) -> DandelionRouter<impl RngCore> {
        DandelionRouter::new(config, peers(num_peers), get_seeded_rng(), Instant::now()).unwrap()
    }

    #[test]
    fn local_tx_with_no_peers_is_fluffed() {
        let router = make_router(DandelionConfig::default(), 0);
        let decision = router.on_local_tx(&test_tx(1), Instant::now());
        assert_eq!(decision, RelayDecision::Fluff);
    }

    #[test]
    fn local_tx_is_stemmed_to_an_outbound_peer() {
        let all_peers = peers(8);
        let router = make_router(DandelionConfig::default(), 8);
        match router.on_local_tx(&test_tx(1), Instant::now()) {
            RelayDecision::Stem(peer) => assert!(all_peers.contains(&peer)),
            RelayDecision::Fluff => panic!("expected a stem decision"),
        }
    }

    #[test]
    fn hop_ceiling_forces_fluff() {
        let config = DandelionConfig::builder().stem_probability(1.0).build();
        let router = make_router(config.clone(), 8);
        let now = Instant::now();
        assert_eq!(
            router.on_stem_tx(&test_tx(1), PeerId::from(99), config.max_stem_hops, now),
            RelayDecision::Fluff
        );
    }

    #[test]
    fn stem_probability_extremes_are_deterministic() {
        let now = Instant::now();

        let always = make_router(DandelionConfig::builder().stem_probability(1.0).build(), 4);
        let never = make_router(DandelionConfig::builder().stem_probability(0.0).build(), 4);

        for _ in 0..32 {
            assert!(matches!(
                always.on_stem_tx(&test_tx(1), PeerId::from(99), 0, now),
                RelayDecision::Stem(_)
            ));
            assert_eq!(
                never.on_stem_tx(&test_tx(1), PeerId::from(99), 0, now),
                RelayDecision::Fluff
            );
        }
    }

    #[test]
    fn successor_is_stable_within_an_epoch() {
        let config = DandelionConfig::builder().stem_probability(1.0).build();
        let router = make_router(config, 8);
        let now = Instant::now();
        let from = PeerId::from(42);

        let first = router.on_stem_tx(&test_tx(1), from, 0, now);
        for fee in 2..10 {
            assert_eq!(router.on_stem_tx(&test_tx(fee), from, 0, now), first);
        }
    }

    #[test]
    fn epoch_rotation_re_derives_successors() {
        let config = DandelionConfig::builder()
            .stem_probability(1.0)
            .epoch_duration_secs(600)
            .build();
        let router = make_router(config.clone(), 8);
        let start = Instant::now();

        assert!(!router.maybe_rotate_epoch(start + Duration::from_secs(599), &peers(8)));
        assert!(router.maybe_rotate_epoch(start + Duration::from_secs(600), &peers(8)));
        // A second rotation within the new epoch is a no-op.
        assert!(!router.maybe_rotate_epoch(start + Duration::from_secs(601), &peers(8)));
    }

    #[test]
    fn embargo_expiry_fluffs_exactly_the_overdue_transactions() {
        let config = DandelionConfig::builder()
            .stem_probability(1.0)
            .embargo_timeout_secs(30)
            .build();
        let router = make_router(config, 8);
        let start = Instant::now();

        let early = test_tx(1);
        let late = test_tx(2);
        assert!(matches!(
            router.on_stem_tx(&early, PeerId::from(5), 0, start),
            RelayDecision::Stem(_)
        ));
        assert!(matches!(
            router.on_stem_tx(&late, PeerId::from(5), 0, start + Duration::from_secs(20)),
            RelayDecision::Stem(_)
        ));

        assert!(router.poll_embargoes(start + Duration::from_secs(29)).is_empty());

        let expired = router.poll_embargoes(start + Duration::from_secs(35));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].tx_hash(), early.tx_hash());

        let expired = router.poll_embargoes(start + Duration::from_secs(60));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].tx_hash(), late.tx_hash());

        assert!(router.poll_embargoes(start + Duration::from_secs(120)).is_empty());
    }

    #[test]
    fn record_seen_disarms_the_embargo() {
        let router = make_router(DandelionConfig::default(), 8);
        let start = Instant::now();

        let tx = test_tx(1);
        router.on_local_tx(&tx, start);
        router.record_seen(&tx.tx_hash());

        assert!(router.poll_embargoes(start + Duration::from_secs(3600)).is_empty());
    }

    #[test]
    fn liveness_every_stem_terminates_within_the_ceiling() {
        // Even with certain stem continuation, the hop ceiling bounds the
        // number of stem decisions.
        let config = DandelionConfig::builder().stem_probability(1.0).build();
        let router = make_router(config.clone(), 8);
        let now = Instant::now();

        let tx = test_tx(1);
        let mut hops = 0u32;
        loop {
            match router.on_stem_tx(&tx, PeerId::from(1), hops, now) {
                RelayDecision::Stem(_) => hops += 1,
                RelayDecision::Fluff => break,
            }
            assert!(hops <= config.max_stem_hops);
        }
        assert_eq!(hops, config.max_stem_hops);
    }

    #[test]
    fn phase_transitions_are_one_way() {
        use PropagationPhase::*;
        assert!(Stem.can_transition_to(Fluff));
        assert!(Fluff.can_transition_to(Broadcasted));
        assert!(!Fluff.can_transition_to(Stem));
        assert!(!Broadcasted.can_transition_to(Fluff));
        assert!(!Stem.can_transition_to(Broadcasted));
    }
}
