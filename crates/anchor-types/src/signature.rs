//! Recoverable secp256k1 signature byte handling.

use crate::TypesError;

pub const SIGNATURE_LENGTH: usize = 65;

/// `r ‖ s` plus a recovery id normalized to 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub rs: [u8; 64],
    pub v: u8,
}

impl RecoverableSignature {
    /// Accepts the 65-byte `r ‖ s ‖ v` layout with `v` in {0, 1, 27, 28}.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(TypesError::InvalidLength {
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            });
        }
        let v = match bytes[64] {
            0 | 1 => bytes[64],
            27 | 28 => bytes[64] - 27,
            _ => return Err(TypesError::InvalidSignature),
        };
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&bytes[..64]);
        Ok(Self { rs, v })
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..64].copy_from_slice(&self.rs);
        out[64] = self.v;
        out
    }
}
