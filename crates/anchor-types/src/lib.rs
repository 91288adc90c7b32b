//! Shared types and pure logic for the forwarder and the DID anchor registry.
//! Usable on-chain and off-chain; the `signer` feature adds secp256k1 signing
//! for clients and tests.

mod bytes;
pub mod call;
pub mod eip712;
mod error;
pub mod forwarded;
mod hash;
mod signature;
#[cfg(feature = "signer")]
pub mod signer;

pub use bytes::{Address, Hash32, HexBytes};
pub use call::{Operation, RegistryCall};
pub use eip712::{
    typed_data_digest, typed_data_json, ForwardRequest, SigningDomain, SigningPayload,
    DOMAIN_NAME, DOMAIN_VERSION,
};
pub use error::TypesError;
pub use forwarded::{append_sender, split_sender, RELAY_METHOD};
pub use hash::keccak256;
pub use signature::{RecoverableSignature, SIGNATURE_LENGTH};
