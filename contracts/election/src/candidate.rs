//! Candidate records, storage, and tallying.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

// ── Storage key prefixes ─────────────────────────────────────────────────────

pub(crate) const CANDIDATE_CTR: Symbol = symbol_short!("CAND_CTR");
pub(crate) const CANDIDATE: Symbol = symbol_short!("CAND");

// TTL: ~30 days / ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 518_400;
const TTL_EXTEND_TO: u32 = 1_036_800;

/// A ballot option.
///
/// Ids are assigned sequentially from 0 in the order the names were supplied
/// to `initialize`. Names never change; `vote_count` only grows.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    pub vote_count: u64,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn candidate_key(id: u32) -> (Symbol, u32) {
    (CANDIDATE, id)
}

pub(crate) fn count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&CANDIDATE_CTR)
        .unwrap_or(0u32)
}

pub(crate) fn store(env: &Env, candidate: &Candidate) {
    let key = candidate_key(candidate.id);
    env.storage().persistent().set(&key, candidate);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u32) -> Option<Candidate> {
    env.storage().persistent().get(&candidate_key(id))
}

/// Write the fixed candidate list. Called exactly once, from `initialize`.
pub(crate) fn create_all(env: &Env, names: &Vec<String>) {
    for (id, name) in names.iter().enumerate() {
        store(
            env,
            &Candidate {
                id: id as u32,
                name,
                vote_count: 0,
            },
        );
    }
    env.storage().instance().set(&CANDIDATE_CTR, &names.len());
}

/// All candidates in creation order.
pub(crate) fn load_all(env: &Env) -> Vec<Candidate> {
    let mut out = Vec::new(env);
    for id in 0..count(env) {
        if let Some(candidate) = load(env, id) {
            out.push_back(candidate);
        }
    }
    out
}

/// Push out the TTL of every candidate entry, so an untouched candidate is
/// not archived while the ballot is live.
pub(crate) fn extend_all(env: &Env) {
    for id in 0..count(env) {
        let key = candidate_key(id);
        if env.storage().persistent().has(&key) {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
    }
}

/// Add one vote to `candidate` and return its new count.
pub(crate) fn record_vote(env: &Env, mut candidate: Candidate) -> u64 {
    candidate.vote_count = candidate.vote_count.saturating_add(1);
    store(env, &candidate);
    candidate.vote_count
}

/// Sum of all vote counts.
pub(crate) fn total_votes(env: &Env) -> u64 {
    load_all(env)
        .iter()
        .fold(0u64, |acc, c| acc.saturating_add(c.vote_count))
}
