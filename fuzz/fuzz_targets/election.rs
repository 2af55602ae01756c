#![no_main]

//! Fuzz harness for the `election` contract.
//!
//! Drives random sequences of registrations, approvals, votes and poll toggles
//! from a small pool of identities (one of them the administrator) and checks
//! the tally invariants after every action.

use arbitrary::Arbitrary;
use election::{ElectionContract, ElectionContractClient, ElectionOp, VoterStatus};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{testutils::Address as _, Address, Env, String, Vec as SorobanVec};

const USERS: usize = 5;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { user: u8, id_seed: u8, id_len: u8 },
    Approve { caller: u8, user: u8 },
    Vote { user: u8, candidate_id: u32 },
    Toggle { caller: u8, open: bool },
    /// Same operations routed through the typed `submit` entry point.
    SubmitVote { user: u8, candidate_id: u8 },
    SubmitToggle { caller: u8, open: bool },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    candidate_count: u8,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(ElectionContract, ());
    let client = ElectionContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let candidate_count = (input.candidate_count % 8) as u32;
    let mut names = SorobanVec::new(&env);
    for i in 0..candidate_count {
        let name = format!("candidate-{}", i);
        names.push_back(String::from_str(&env, &name));
    }

    if client.try_initialize(&admin, &names).is_err() {
        // Only an empty ballot may be rejected.
        assert_eq!(candidate_count, 0, "valid ballot rejected");
        assert!(!client.is_initialized());
        return;
    }

    let mut users = vec![admin.clone()];
    for _ in 1..USERS {
        users.push(Address::generate(&env));
    }
    let pick = |i: u8| &users[i as usize % users.len()];

    let mut previous: Vec<VoterStatus> = users.iter().map(|u| client.get_voter_status(u)).collect();

    for action in input.actions.into_iter().take(64) {
        match action {
            FuzzAction::Register { user, id_seed, id_len } => {
                let id: std::string::String =
                    std::iter::repeat((b'a' + id_seed % 26) as char).take(id_len as usize).collect();
                let _ = client.try_register_voter(pick(user), &String::from_str(&env, &id));
            }
            FuzzAction::Approve { caller, user } => {
                let _ = client.try_approve_voter(pick(caller), pick(user));
            }
            FuzzAction::Vote { user, candidate_id } => {
                let _ = client.try_vote(pick(user), &candidate_id);
            }
            FuzzAction::Toggle { caller, open } => {
                let _ = client.try_toggle_voting(pick(caller), &open);
            }
            FuzzAction::SubmitVote { user, candidate_id } => {
                let _ = client.try_submit(pick(user), &ElectionOp::Vote(candidate_id as u32));
            }
            FuzzAction::SubmitToggle { caller, open } => {
                let _ = client.try_submit(pick(caller), &ElectionOp::Toggle(open));
            }
        }

        // ── Post-action invariant checks ──
        assert_eq!(client.get_admin(), admin, "INVARIANT VIOLATION: admin changed");
        assert_eq!(client.get_candidate_count(), candidate_count);

        let mut expected = vec![0u64; candidate_count as usize];
        let current: Vec<VoterStatus> = users.iter().map(|u| client.get_voter_status(u)).collect();
        for (before, after) in previous.iter().zip(current.iter()) {
            if let VoterStatus::Voted(_) = before {
                assert_eq!(before, after, "INVARIANT VIOLATION: cast vote changed");
            }
            if let VoterStatus::Voted(id) = after {
                assert!(*id < candidate_count, "INVARIANT VIOLATION: vote for unknown candidate");
                expected[*id as usize] += 1;
            }
        }

        let tally: Vec<u64> = client.get_all_candidates().iter().map(|c| c.vote_count).collect();
        assert_eq!(tally, expected, "INVARIANT VIOLATION: tally != voted records");

        let pending = client.get_pending_voters();
        for (user, status) in users.iter().zip(current.iter()) {
            assert_eq!(
                pending.contains(user),
                *status == VoterStatus::Pending,
                "INVARIANT VIOLATION: pending queue out of sync"
            );
        }
        assert_eq!(
            client.get_pending_count(),
            pending.len(),
            "INVARIANT VIOLATION: pending count drifted"
        );

        previous = current;
    }
});
