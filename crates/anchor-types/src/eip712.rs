//! EIP-712 typed structured data for forward requests.
//!
//! The type strings are the ones OpenZeppelin's `MinimalForwarder` signs, so a
//! stock `eth_signTypedData_v4` wallet produces signatures the forwarder accepts.
//! NEAR account ids in address-typed fields go through
//! [`Address::from_account_id`].

use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::json_types::{U128, U64};
use near_sdk::serde::{Deserialize, Serialize};
use near_sdk::AccountId;
use near_sdk_macros::NearSchema;
use serde_json::{json, Value};

use crate::{keccak256, Address, Hash32, HexBytes};

pub const DOMAIN_NAME: &str = "MinimalForwarder";
pub const DOMAIN_VERSION: &str = "0.0.1";
pub const DOMAIN_TYPE: &str = "EIP712Domain";
pub const PRIMARY_TYPE: &str = "ForwardRequest";

/// `(name, type)` pairs in encoding order.
pub const DOMAIN_FIELDS: [(&str, &str); 4] = [
    ("name", "string"),
    ("version", "string"),
    ("chainId", "uint256"),
    ("verifyingContract", "address"),
];

pub const FORWARD_REQUEST_FIELDS: [(&str, &str); 6] = [
    ("from", "address"),
    ("to", "address"),
    ("value", "uint256"),
    ("gas", "uint256"),
    ("nonce", "uint256"),
    ("data", "bytes"),
];

/// `Name(type1 name1,type2 name2,...)`
pub fn encode_type(name: &str, fields: &[(&str, &str)]) -> String {
    let members: Vec<String> = fields
        .iter()
        .map(|(field, kind)| format!("{kind} {field}"))
        .collect();
    format!("{name}({})", members.join(","))
}

pub fn domain_typehash() -> [u8; 32] {
    keccak256(encode_type(DOMAIN_TYPE, &DOMAIN_FIELDS).as_bytes())
}

pub fn forward_request_typehash() -> [u8; 32] {
    keccak256(encode_type(PRIMARY_TYPE, &FORWARD_REQUEST_FIELDS).as_bytes())
}

fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

fn uint_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

#[derive(
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Clone,
    Debug,
    PartialEq,
    Eq,
    NearSchema,
)]
#[serde(crate = "near_sdk::serde", rename_all = "camelCase")]
#[borsh(crate = "near_sdk::borsh")]
#[abi(json, borsh)]
pub struct SigningDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl SigningDomain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id,
            verifying_contract,
        }
    }

    pub fn for_account(chain_id: u64, verifying_contract: &AccountId) -> Self {
        Self::new(chain_id, Address::from_account_id(verifying_contract))
    }

    pub fn separator(&self) -> [u8; 32] {
        let mut encoded = Vec::with_capacity(5 * 32);
        encoded.extend_from_slice(&domain_typehash());
        encoded.extend_from_slice(&keccak256(self.name.as_bytes()));
        encoded.extend_from_slice(&keccak256(self.version.as_bytes()));
        encoded.extend_from_slice(&uint_word(self.chain_id as u128));
        encoded.extend_from_slice(&address_word(&self.verifying_contract));
        keccak256(&encoded)
    }
}

/// A call `from` wants executed on `to`. Signed once, never mutated.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Clone,
    Debug,
    PartialEq,
    Eq,
    NearSchema,
)]
#[serde(crate = "near_sdk::serde")]
#[borsh(crate = "near_sdk::borsh")]
#[abi(json, borsh)]
pub struct ForwardRequest {
    pub from: Address,
    pub to: AccountId,
    /// yoctoNEAR attached to the wrapped call.
    pub value: U128,
    /// NEAR gas for the wrapped call.
    pub gas: U64,
    pub nonce: U64,
    pub data: HexBytes,
}

impl ForwardRequest {
    /// The request as the wallet sees it: `to` in address form.
    pub fn message(&self) -> ForwardRequestMessage {
        ForwardRequestMessage {
            from: self.from,
            to: Address::from_account_id(&self.to),
            value: self.value,
            gas: self.gas,
            nonce: self.nonce,
            data: self.data.clone(),
        }
    }

    pub fn struct_hash(&self) -> [u8; 32] {
        self.message().struct_hash()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, NearSchema)]
#[serde(crate = "near_sdk::serde")]
#[abi(json)]
pub struct ForwardRequestMessage {
    pub from: Address,
    pub to: Address,
    pub value: U128,
    pub gas: U64,
    pub nonce: U64,
    pub data: HexBytes,
}

impl ForwardRequestMessage {
    pub fn struct_hash(&self) -> [u8; 32] {
        let mut encoded = Vec::with_capacity(7 * 32);
        encoded.extend_from_slice(&forward_request_typehash());
        encoded.extend_from_slice(&address_word(&self.from));
        encoded.extend_from_slice(&address_word(&self.to));
        encoded.extend_from_slice(&uint_word(self.value.0));
        encoded.extend_from_slice(&uint_word(self.gas.0 as u128));
        encoded.extend_from_slice(&uint_word(self.nonce.0 as u128));
        encoded.extend_from_slice(&keccak256(&self.data.0));
        keccak256(&encoded)
    }
}

/// `keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)`
pub fn typed_data_digest(domain: &SigningDomain, request: &ForwardRequest) -> Hash32 {
    let mut preimage = Vec::with_capacity(2 + 64);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(&domain.separator());
    preimage.extend_from_slice(&request.struct_hash());
    Hash32(keccak256(&preimage))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, NearSchema)]
#[serde(crate = "near_sdk::serde")]
#[abi(json)]
pub struct TypedField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

fn typed_fields(fields: &[(&str, &str)]) -> Vec<TypedField> {
    fields
        .iter()
        .map(|(name, kind)| TypedField {
            name: name.to_string(),
            kind: kind.to_string(),
        })
        .collect()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, NearSchema)]
#[serde(crate = "near_sdk::serde")]
#[abi(json)]
pub struct PayloadTypes {
    #[serde(rename = "EIP712Domain")]
    pub eip712_domain: Vec<TypedField>,
    #[serde(rename = "ForwardRequest")]
    pub forward_request: Vec<TypedField>,
}

impl Default for PayloadTypes {
    fn default() -> Self {
        Self {
            eip712_domain: typed_fields(&DOMAIN_FIELDS),
            forward_request: typed_fields(&FORWARD_REQUEST_FIELDS),
        }
    }
}

/// Everything a client needs to sign a request, plus the digest it should sign.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, NearSchema)]
#[serde(crate = "near_sdk::serde", rename_all = "camelCase")]
#[abi(json)]
pub struct SigningPayload {
    pub types: PayloadTypes,
    pub domain: SigningDomain,
    pub primary_type: String,
    pub message: ForwardRequestMessage,
    pub digest: Hash32,
}

impl SigningPayload {
    pub fn new(domain: SigningDomain, request: &ForwardRequest) -> Self {
        let digest = typed_data_digest(&domain, request);
        Self {
            types: PayloadTypes::default(),
            domain,
            primary_type: PRIMARY_TYPE.to_string(),
            message: request.message(),
            digest,
        }
    }

    /// The `eth_signTypedData_v4` argument, i.e. the payload without the digest.
    pub fn typed_data_json(&self) -> Value {
        json!({
            "types": self.types,
            "domain": self.domain,
            "primaryType": self.primary_type,
            "message": self.message,
        })
    }
}

pub fn typed_data_json(domain: &SigningDomain, request: &ForwardRequest) -> Value {
    SigningPayload::new(domain.clone(), request).typed_data_json()
}
