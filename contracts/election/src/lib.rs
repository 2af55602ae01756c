#![no_std]

//! # Election
//!
//! A single-election voting contract:
//!
//! - **Fixed ballot**: candidates are created once at initialization, ids `0..n`
//! - **Approval workflow**: voters self-register, the administrator approves
//! - **One vote per identity**: `Unregistered → Pending → Approved → Voted`
//! - **Admin-gated polls**: only the administrator opens and closes voting
//! - **Live tallies**: anyone can read candidate counts at any time
//!
//! Every entry point is atomic. Preconditions are checked before any storage
//! write, and a rejected call leaves no trace. Registrations, approvals and
//! votes cannot be retracted.

pub mod candidate;
pub mod events;
pub mod operation;
pub mod validation;
pub mod voter;

use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec,
};

pub use candidate::Candidate;
pub use operation::ElectionOp;
pub use voter::{PendingPage, Voter, VoterStatus};

// ── Storage key constants ─────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const VOTING_OPEN: Symbol = symbol_short!("OPEN");

// TTL: ~30 days / ~60 days
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

// ── Error codes ───────────────────────────────────────────────────────────────

/// Every way an election operation can be rejected.
///
/// Discriminants are part of the client ABI and must not be renumbered.
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ElectionError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Empty candidate list, or an empty / over-long candidate name.
    InvalidConfig = 3,
    AlreadyRegistered = 4,
    NotPending = 5,
    /// Caller is not the administrator, or is not an approved voter.
    Unauthorized = 6,
    VotingClosed = 7,
    AlreadyVoted = 8,
    InvalidCandidate = 9,
    /// Empty or over-long identity hash.
    InvalidInput = 10,
    /// Another identity already registered with this identity hash.
    IdHashTaken = 11,
}

impl ElectionError {
    /// Human-readable description for client layers.
    pub fn message(&self) -> &'static str {
        match self {
            ElectionError::NotInitialized => "the election has not been set up yet",
            ElectionError::AlreadyInitialized => "the election has already been set up",
            ElectionError::InvalidConfig => "the candidate list is empty or contains an invalid name",
            ElectionError::AlreadyRegistered => "this account is already registered",
            ElectionError::NotPending => "this account has no registration awaiting approval",
            ElectionError::Unauthorized => "this account is not allowed to perform the operation",
            ElectionError::VotingClosed => "voting is currently closed",
            ElectionError::AlreadyVoted => "this account has already voted",
            ElectionError::InvalidCandidate => "no candidate exists with that id",
            ElectionError::InvalidInput => "the identity hash is empty or too long",
            ElectionError::IdHashTaken => "this identity hash is already registered",
        }
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct ElectionContract;

#[contractimpl]
impl ElectionContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Create the election.
    ///
    /// * `admin`: the single administrator, fixed for the contract's lifetime.
    /// * `candidate_names`: the ballot in display order. Ids are assigned
    ///   `0..n` in this order.
    ///
    /// Voting starts closed.
    pub fn initialize(
        env: Env,
        admin: Address,
        candidate_names: Vec<String>,
    ) -> Result<(), ElectionError> {
        admin.require_auth();
        Self::do_initialize(&env, &admin, &candidate_names)
    }

    // ── Voter operations ──────────────────────────────────────────────────────

    /// Register the caller as a voter, pending administrator approval.
    ///
    /// Does not require voting to be open.
    pub fn register_voter(env: Env, voter: Address, id_hash: String) -> Result<(), ElectionError> {
        voter.require_auth();
        Self::do_register(&env, &voter, &id_hash)
    }

    /// Cast the caller's single vote.
    ///
    /// Checks, in order: voting open, caller approved and not yet voted,
    /// candidate exists.
    pub fn vote(env: Env, voter: Address, candidate_id: u32) -> Result<(), ElectionError> {
        voter.require_auth();
        Self::do_vote(&env, &voter, candidate_id)
    }

    // ── Admin operations ──────────────────────────────────────────────────────

    /// Approve a pending voter.
    pub fn approve_voter(env: Env, admin: Address, voter: Address) -> Result<(), ElectionError> {
        admin.require_auth();
        Self::do_approve(&env, &admin, &voter)
    }

    /// Open or close voting.
    ///
    /// Setting the current value again succeeds and changes nothing, so a
    /// duplicated admin transaction is harmless.
    pub fn toggle_voting(env: Env, admin: Address, open: bool) -> Result<(), ElectionError> {
        admin.require_auth();
        Self::do_toggle(&env, &admin, open)
    }

    // ── Typed submission ──────────────────────────────────────────────────────

    /// Apply one typed operation on behalf of `caller`.
    ///
    /// Runs exactly the same checks and transitions as the dedicated entry
    /// points.
    pub fn submit(env: Env, caller: Address, op: ElectionOp) -> Result<(), ElectionError> {
        caller.require_auth();
        match op {
            ElectionOp::Initialize(names) => Self::do_initialize(&env, &caller, &names),
            ElectionOp::Register(id_hash) => Self::do_register(&env, &caller, &id_hash),
            ElectionOp::Approve(voter) => Self::do_approve(&env, &caller, &voter),
            ElectionOp::Vote(candidate_id) => Self::do_vote(&env, &caller, candidate_id),
            ElectionOp::Toggle(open) => Self::do_toggle(&env, &caller, open),
        }
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn get_admin(env: Env) -> Result<Address, ElectionError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ElectionError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn is_voting_open(env: Env) -> bool {
        Self::voting_open(&env)
    }

    /// All candidates in creation order with their current tallies.
    pub fn get_all_candidates(env: Env) -> Vec<Candidate> {
        candidate::load_all(&env)
    }

    pub fn get_candidate(env: Env, candidate_id: u32) -> Option<Candidate> {
        candidate::load(&env, candidate_id)
    }

    pub fn get_candidate_count(env: Env) -> u32 {
        candidate::count(&env)
    }

    /// Sum of every candidate's tally.
    pub fn get_total_votes(env: Env) -> u64 {
        candidate::total_votes(&env)
    }

    /// Registered-but-unapproved voters in registration order.
    ///
    /// Public: the addresses are already visible in the registration events.
    /// Reads one entry per queue slot, so long queues should be read with
    /// `get_pending_voters_page` instead.
    pub fn get_pending_voters(env: Env) -> Vec<Address> {
        voter::pending(&env)
    }

    /// One window of the pending queue, for queues too long to read in a
    /// single call.
    ///
    /// Start at `0` and pass each page's `next` as the following `start`
    /// until `done` is set. At most `voter::MAX_PAGE` slots are scanned.
    pub fn get_pending_voters_page(env: Env, start: u32, limit: u32) -> PendingPage {
        voter::pending_page(&env, start, limit)
    }

    /// Number of voters awaiting approval.
    pub fn get_pending_count(env: Env) -> u32 {
        voter::pending_count(&env)
    }

    pub fn get_voter(env: Env, voter: Address) -> Option<Voter> {
        voter::load(&env, &voter)
    }

    pub fn get_voter_status(env: Env, voter: Address) -> VoterStatus {
        voter::load(&env, &voter)
            .map(|record| record.status())
            .unwrap_or(VoterStatus::NotRegistered)
    }

    /// Number of voter records ever created.
    pub fn get_voter_count(env: Env) -> u32 {
        voter::count(&env)
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    fn do_initialize(
        env: &Env,
        admin: &Address,
        candidate_names: &Vec<String>,
    ) -> Result<(), ElectionError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ElectionError::AlreadyInitialized);
        }
        validation::validate_candidate_names(candidate_names)?;

        env.storage().instance().set(&ADMIN, admin);
        env.storage().instance().set(&VOTING_OPEN, &false);
        candidate::create_all(env, candidate_names);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_instance_ttl(env);

        events::publish_initialized(env, admin, candidate_names.len());

        Ok(())
    }

    fn do_register(env: &Env, voter: &Address, id_hash: &String) -> Result<(), ElectionError> {
        Self::require_initialized(env)?;

        if voter::is_registered(env, voter) {
            return Err(ElectionError::AlreadyRegistered);
        }
        validation::validate_id_hash(id_hash)?;
        if voter::id_hash_owner(env, id_hash).is_some() {
            return Err(ElectionError::IdHashTaken);
        }

        voter::register(env, voter, id_hash);
        Self::extend_instance_ttl(env);

        events::publish_voter_registered(env, voter, id_hash);

        Ok(())
    }

    fn do_approve(env: &Env, admin: &Address, voter: &Address) -> Result<(), ElectionError> {
        Self::require_initialized(env)?;
        Self::require_admin(env, admin)?;

        voter::approve(env, voter).ok_or(ElectionError::NotPending)?;
        Self::extend_instance_ttl(env);

        events::publish_voter_approved(env, admin, voter);

        Ok(())
    }

    fn do_vote(env: &Env, voter: &Address, candidate_id: u32) -> Result<(), ElectionError> {
        Self::require_initialized(env)?;

        if !Self::voting_open(env) {
            return Err(ElectionError::VotingClosed);
        }

        let mut record = voter::load_live(env, voter).ok_or(ElectionError::Unauthorized)?;
        if record.has_voted() {
            return Err(ElectionError::AlreadyVoted);
        }
        if !record.is_approved {
            return Err(ElectionError::Unauthorized);
        }

        let chosen = candidate::load(env, candidate_id).ok_or(ElectionError::InvalidCandidate)?;

        // Both writes happen in this invocation or neither does.
        voter::mark_voted(env, &mut record, candidate_id);
        let new_count = candidate::record_vote(env, chosen);
        Self::extend_instance_ttl(env);

        events::publish_vote_cast(env, voter, candidate_id, new_count);

        Ok(())
    }

    fn do_toggle(env: &Env, admin: &Address, open: bool) -> Result<(), ElectionError> {
        Self::require_initialized(env)?;
        Self::require_admin(env, admin)?;

        let changed = Self::voting_open(env) != open;
        env.storage().instance().set(&VOTING_OPEN, &open);
        if open {
            candidate::extend_all(env);
        }
        Self::extend_instance_ttl(env);

        events::publish_voting_toggled(env, admin, open, changed);

        Ok(())
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn voting_open(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&VOTING_OPEN)
            .unwrap_or(false)
    }

    fn require_initialized(env: &Env) -> Result<(), ElectionError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ElectionError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ElectionError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ElectionError::NotInitialized)?;
        if *caller != admin {
            return Err(ElectionError::Unauthorized);
        }
        Ok(())
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
