//! Signer recovery through the runtime's `ecrecover` host function.

use anchor_types::{Address, Hash32, RecoverableSignature};
use near_sdk::env;

use crate::errors::ForwarderError;

pub fn recover_signer(digest: &Hash32, signature: &[u8]) -> Result<Address, ForwarderError> {
    let signature =
        RecoverableSignature::from_bytes(signature).map_err(|_| ForwarderError::InvalidSignature)?;
    // Malleability flag set: high-s signatures do not recover.
    let public_key = env::ecrecover(digest.as_bytes(), &signature.rs, signature.v, true)
        .ok_or(ForwarderError::InvalidSignature)?;
    Ok(Address::from_public_key(&public_key))
}
