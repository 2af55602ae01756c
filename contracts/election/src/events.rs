//! Structured event publishing for the election contract.
//!
//! Every successful state transition emits exactly one event under the
//! topic `(ELECTION, <kind>)` so indexers can follow the election without
//! polling storage. Rejected operations emit nothing.

#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

const TOPIC: Symbol = symbol_short!("ELECTION");

// ── Event payloads ───────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ElectionInitializedEvent {
    pub admin: Address,
    pub candidate_count: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRegisteredEvent {
    pub voter: Address,
    pub id_hash: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterApprovedEvent {
    pub admin: Address,
    pub voter: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub voter: Address,
    pub candidate_id: u32,
    /// Candidate's tally after this vote.
    pub new_count: u64,
    pub timestamp: u64,
}

/// `changed` is false when the admin re-sent the current state.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VotingToggledEvent {
    pub admin: Address,
    pub open: bool,
    pub changed: bool,
    pub timestamp: u64,
}

// ── Publishers ───────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: &Address, candidate_count: u32) {
    env.events().publish(
        (TOPIC, symbol_short!("INIT")),
        ElectionInitializedEvent {
            admin: admin.clone(),
            candidate_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_voter_registered(env: &Env, voter: &Address, id_hash: &String) {
    env.events().publish(
        (TOPIC, symbol_short!("REG")),
        VoterRegisteredEvent {
            voter: voter.clone(),
            id_hash: id_hash.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_voter_approved(env: &Env, admin: &Address, voter: &Address) {
    env.events().publish(
        (TOPIC, symbol_short!("APPROVE")),
        VoterApprovedEvent {
            admin: admin.clone(),
            voter: voter.clone(),
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vote_cast(env: &Env, voter: &Address, candidate_id: u32, new_count: u64) {
    env.events().publish(
        (TOPIC, symbol_short!("VOTE")),
        VoteCastEvent {
            voter: voter.clone(),
            candidate_id,
            new_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_voting_toggled(env: &Env, admin: &Address, open: bool, changed: bool) {
    env.events().publish(
        (TOPIC, symbol_short!("TOGGLE")),
        VotingToggledEvent {
            admin: admin.clone(),
            open,
            changed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
