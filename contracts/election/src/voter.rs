//! Voter records, the pending-approval queue, and the id-hash index.
//!
//! ## Lifecycle
//! ```text
//! Unregistered ──register_voter──► Pending ──approve_voter──► Approved ──vote──► Voted
//! ```
//! Records are never deleted and no transition runs backwards.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

// ── Storage key prefixes ─────────────────────────────────────────────────────

const VOTER: Symbol = symbol_short!("VOTER");
const ID_HASH: Symbol = symbol_short!("ID_HASH");
const PENDING: Symbol = symbol_short!("PEND");
const PENDING_HEAD: Symbol = symbol_short!("PEND_HD");
const PENDING_CTR: Symbol = symbol_short!("PEND_CTR");
const VOTER_CTR: Symbol = symbol_short!("VOTR_CTR");

// TTL: ~30 days
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

/// Upper bound on queue slots scanned by one page read.
pub const MAX_PAGE: u32 = 100;

/// Upper bound on empty slots the queue head skips after one approval.
const MAX_HEAD_SKIP: u32 = 32;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Per-identity election record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Voter {
    pub address: Address,
    /// Voter-supplied hash of a real-world identity document.
    pub id_hash: String,
    /// Registration sequence number. Keys the pending-queue slot while the
    /// record is Pending.
    pub seq: u32,
    pub is_approved: bool,
    /// The chosen candidate. `Some` exactly when the voter has voted.
    pub candidate_id: Option<u32>,
    pub registered_at: u64,
}

/// Status view returned to clients.
///
/// `NotRegistered` is an explicit variant so an unknown identity is never
/// confused with a defaulted record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VoterStatus {
    NotRegistered,
    Pending,
    Approved,
    Voted(u32),
}

/// One window of the pending queue.
///
/// `next` is the sequence number to pass as `start` for the following page.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingPage {
    pub voters: Vec<Address>,
    pub next: u32,
    pub done: bool,
}

impl Voter {
    pub fn has_voted(&self) -> bool {
        self.candidate_id.is_some()
    }

    pub fn status(&self) -> VoterStatus {
        match self.candidate_id {
            Some(id) => VoterStatus::Voted(id),
            None if self.is_approved => VoterStatus::Approved,
            None => VoterStatus::Pending,
        }
    }
}

// ── Voter records ────────────────────────────────────────────────────────────

fn voter_key(voter: &Address) -> (Symbol, Address) {
    (VOTER, voter.clone())
}

fn id_hash_key(id_hash: &String) -> (Symbol, String) {
    (ID_HASH, id_hash.clone())
}

fn pending_key(seq: u32) -> (Symbol, u32) {
    (PENDING, seq)
}

pub(crate) fn load(env: &Env, voter: &Address) -> Option<Voter> {
    env.storage().persistent().get(&voter_key(voter))
}

/// Load a record and push its TTL out, for paths about to act on it.
pub(crate) fn load_live(env: &Env, voter: &Address) -> Option<Voter> {
    let key = voter_key(voter);
    let record = env.storage().persistent().get(&key)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Some(record)
}

pub(crate) fn store(env: &Env, record: &Voter) {
    let key = voter_key(&record.address);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn is_registered(env: &Env, voter: &Address) -> bool {
    env.storage().persistent().has(&voter_key(voter))
}

/// Number of voter records ever created. Also the next sequence number.
pub(crate) fn count(env: &Env) -> u32 {
    env.storage().instance().get(&VOTER_CTR).unwrap_or(0u32)
}

fn bump_count(env: &Env) {
    let next = count(env).saturating_add(1);
    env.storage().instance().set(&VOTER_CTR, &next);
}

// ── Id-hash index ────────────────────────────────────────────────────────────

/// Owner of `id_hash`, if any identity has already registered with it.
pub(crate) fn id_hash_owner(env: &Env, id_hash: &String) -> Option<Address> {
    let key = id_hash_key(id_hash);
    let owner = env.storage().persistent().get(&key)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Some(owner)
}

fn claim_id_hash(env: &Env, id_hash: &String, voter: &Address) {
    let key = id_hash_key(id_hash);
    env.storage().persistent().set(&key, voter);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Pending queue ────────────────────────────────────────────────────────────
//
// One persistent slot `(PEND, seq)` per Pending voter. Slots are only ever
// created at the tail (`VOTR_CTR`) and deleted on approval, so live slots are
// in registration order. `PEND_HD` is a lower bound on the oldest live slot.

fn head(env: &Env) -> u32 {
    env.storage().instance().get(&PENDING_HEAD).unwrap_or(0u32)
}

/// Number of voters awaiting approval.
pub(crate) fn pending_count(env: &Env) -> u32 {
    env.storage().instance().get(&PENDING_CTR).unwrap_or(0u32)
}

fn set_pending_count(env: &Env, value: u32) {
    env.storage().instance().set(&PENDING_CTR, &value);
}

fn enqueue(env: &Env, seq: u32, voter: &Address) {
    let key = pending_key(seq);
    env.storage().persistent().set(&key, voter);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    set_pending_count(env, pending_count(env).saturating_add(1));
}

/// Move the head past freed slots, at most `MAX_HEAD_SKIP` per call.
fn advance_head(env: &Env) {
    let tail = count(env);
    let mut head = head(env);
    let mut skipped = 0;
    while head < tail
        && skipped < MAX_HEAD_SKIP
        && !env.storage().persistent().has(&pending_key(head))
    {
        head += 1;
        skipped += 1;
    }
    env.storage().instance().set(&PENDING_HEAD, &head);
}

/// Live queue entries in the slot range `[from, to)`.
fn collect_pending(env: &Env, from: u32, to: u32) -> Vec<Address> {
    let mut out = Vec::new(env);
    for seq in from..to {
        if let Some(voter) = env.storage().persistent().get(&pending_key(seq)) {
            out.push_back(voter);
        }
    }
    out
}

/// The whole queue in registration order.
pub(crate) fn pending(env: &Env) -> Vec<Address> {
    collect_pending(env, head(env), count(env))
}

/// Scan at most `limit` queue slots starting at `start`.
///
/// `start` below the head is clamped up to it, and `limit` is capped at
/// `MAX_PAGE`. Empty slots count toward `limit`, so a page may hold fewer
/// than `limit` voters without being the last one.
pub(crate) fn pending_page(env: &Env, start: u32, limit: u32) -> PendingPage {
    let tail = count(env);
    let from = start.max(head(env)).min(tail);
    let to = from.saturating_add(limit.min(MAX_PAGE)).min(tail);
    PendingPage {
        voters: collect_pending(env, from, to),
        next: to,
        done: to >= tail,
    }
}

// ── Transitions ──────────────────────────────────────────────────────────────

/// Create a Pending record, claim its id hash, and enqueue it for approval.
///
/// Callers must have rejected duplicates (identity and id hash) first.
pub(crate) fn register(env: &Env, voter: &Address, id_hash: &String) -> Voter {
    let seq = count(env);
    let record = Voter {
        address: voter.clone(),
        id_hash: id_hash.clone(),
        seq,
        is_approved: false,
        candidate_id: None,
        registered_at: env.ledger().timestamp(),
    };
    store(env, &record);
    claim_id_hash(env, id_hash, voter);
    enqueue(env, seq, voter);
    bump_count(env);

    record
}

/// Move a Pending record to Approved and free its queue slot.
///
/// Returns `None` when `voter` has no Pending record.
pub(crate) fn approve(env: &Env, voter: &Address) -> Option<Voter> {
    let mut record = load(env, voter)?;
    let slot = pending_key(record.seq);
    if record.is_approved || !env.storage().persistent().has(&slot) {
        return None;
    }

    record.is_approved = true;
    store(env, &record);

    env.storage().persistent().remove(&slot);
    set_pending_count(env, pending_count(env).saturating_sub(1));
    advance_head(env);

    Some(record)
}

/// Pin the chosen candidate, which marks the record as voted.
pub(crate) fn mark_voted(env: &Env, record: &mut Voter, candidate_id: u32) {
    record.candidate_id = Some(candidate_id);
    store(env, record);
}
