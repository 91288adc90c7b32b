use sha3::{Digest, Keccak256};

/// Keccak-256 (the pre-standard SHA-3 variant used by EIP-712).
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}
