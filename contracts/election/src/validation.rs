use soroban_sdk::{String, Vec};

use crate::ElectionError;

/// Upper bound on the fixed candidate list.
pub const MAX_CANDIDATES: u32 = 64;
/// Longest accepted candidate name, in bytes.
pub const MAX_NAME_LEN: u32 = 64;
/// Longest accepted identity hash, in bytes.
pub const MAX_ID_HASH_LEN: u32 = 128;

/// Validate the candidate list supplied at initialization.
///
/// The list must be non-empty, no longer than `MAX_CANDIDATES`, and every
/// name must be non-empty and at most `MAX_NAME_LEN` bytes.
pub fn validate_candidate_names(names: &Vec<String>) -> Result<(), ElectionError> {
    if names.is_empty() || names.len() > MAX_CANDIDATES {
        return Err(ElectionError::InvalidConfig);
    }
    for name in names.iter() {
        validate_candidate_name(&name)?;
    }
    Ok(())
}

/// Validate a single candidate name.
///
/// Whitespace-only names are rejected along with empty ones.
pub fn validate_candidate_name(name: &String) -> Result<(), ElectionError> {
    let len = name.len();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ElectionError::InvalidConfig);
    }

    let mut buf = [0u8; MAX_NAME_LEN as usize];
    name.copy_into_slice(&mut buf[..len as usize]);

    if buf[..len as usize].iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ElectionError::InvalidConfig);
    }

    Ok(())
}

/// Validate a voter-supplied identity hash. Opaque, so only the length is checked.
pub fn validate_id_hash(id_hash: &String) -> Result<(), ElectionError> {
    let len = id_hash.len();
    if len == 0 || len > MAX_ID_HASH_LEN {
        return Err(ElectionError::InvalidInput);
    }
    Ok(())
}
