//! Registry calls carried in `ForwardRequest::data`, and the operation classes
//! the registry reports for each anchor write.

use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use near_sdk::AccountId;
use near_sdk_macros::NearSchema;

use crate::{Hash32, TypesError};

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
#[serde(crate = "near_sdk::serde", tag = "method", rename_all = "snake_case")]
#[borsh(crate = "near_sdk::borsh")]
#[abi(json, borsh)]
pub enum RegistryCall {
    AnchorDid { did_hash: Hash32, doc_hash: Hash32 },
    AddAdmin { account_id: AccountId },
    RemoveAdmin { account_id: AccountId },
    AddMember { account_id: AccountId },
    RemoveMember { account_id: AccountId },
}

impl RegistryCall {
    pub fn encode(&self) -> Result<Vec<u8>, TypesError> {
        borsh::to_vec(self).map_err(|e| TypesError::Encoding(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TypesError> {
        Self::try_from_slice(bytes).map_err(|_| TypesError::MalformedCall)
    }

    pub fn method_name(&self) -> &'static str {
        match self {
            Self::AnchorDid { .. } => "anchor_did",
            Self::AddAdmin { .. } => "add_admin",
            Self::RemoveAdmin { .. } => "remove_admin",
            Self::AddMember { .. } => "add_member",
            Self::RemoveMember { .. } => "remove_member",
        }
    }
}

/// Outcome class of an anchor write. Serialized as its numeric code.
#[derive(
    BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq, NearSchema,
)]
#[borsh(crate = "near_sdk::borsh", use_discriminant = true)]
#[abi(json, borsh)]
#[repr(u8)]
pub enum Operation {
    Create = 0,
    Update = 1,
    Delete = 2,
}

impl Operation {
    /// A zero `next` is a delete, even when nothing was stored.
    pub fn classify(previous: &Hash32, next: &Hash32) -> Self {
        if next.is_zero() {
            Self::Delete
        } else if previous.is_zero() {
            Self::Create
        } else {
            Self::Update
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Create),
            1 => Some(Self::Update),
            2 => Some(Self::Delete),
            _ => None,
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = <u8 as Deserialize>::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown operation code {code}")))
    }
}
