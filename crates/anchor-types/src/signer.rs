//! Off-chain request signing with secp256k1 keys.

use near_crypto::{KeyType, PublicKey, Secp256K1Signature, SecretKey, Signature};

use crate::eip712::{typed_data_digest, ForwardRequest, SigningDomain};
use crate::{Address, Hash32, TypesError, SIGNATURE_LENGTH};

/// Address of a secp256k1 public key; `None` for other key types.
pub fn address_of(public_key: &PublicKey) -> Option<Address> {
    if !matches!(public_key.key_type(), KeyType::SECP256K1) {
        return None;
    }
    let key: [u8; 64] = public_key.key_data().try_into().ok()?;
    Some(Address::from_public_key(&key))
}

/// `r ‖ s ‖ v` over a 32-byte digest, `v` in {0, 1}.
pub fn sign_digest(
    secret_key: &SecretKey,
    digest: &Hash32,
) -> Result<[u8; SIGNATURE_LENGTH], TypesError> {
    match secret_key.sign(digest.as_bytes()) {
        Signature::SECP256K1(signature) => Ok(signature.into()),
        Signature::ED25519(_) => Err(TypesError::InvalidSignature),
    }
}

pub fn sign_meta_tx_request(
    secret_key: &SecretKey,
    domain: &SigningDomain,
    request: &ForwardRequest,
) -> Result<[u8; SIGNATURE_LENGTH], TypesError> {
    sign_digest(secret_key, &typed_data_digest(domain, request))
}

/// Inverse of [`sign_digest`], accepting `v` in {0, 1, 27, 28}.
pub fn recover_signer(digest: &Hash32, signature: &[u8]) -> Result<Address, TypesError> {
    let signature = crate::RecoverableSignature::from_bytes(signature)?;
    let recovered = Secp256K1Signature::from(signature.to_bytes())
        .recover(digest.0)
        .map_err(|_| TypesError::InvalidSignature)?;
    let key: [u8; 64] = recovered
        .as_ref()
        .try_into()
        .map_err(|_| TypesError::InvalidSignature)?;
    Ok(Address::from_public_key(&key))
}
