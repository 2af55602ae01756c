//! Typed operations accepted by `ElectionContract::submit`.

use soroban_sdk::{contracttype, Address, String, Vec};

/// One mutating election operation.
///
/// The caller identity travels alongside the operation, never inside it, so
/// an operation cannot name a different actor than the one that signed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionOp {
    /// Create the election with the caller as administrator.
    Initialize(Vec<String>),
    /// Register the caller with the given identity hash.
    Register(String),
    /// Approve a pending voter (administrator only).
    Approve(Address),
    /// Cast the caller's vote for a candidate id.
    Vote(u32),
    /// Open (`true`) or close (`false`) voting (administrator only).
    Toggle(bool),
}
