//! Fixed-width byte types. JSON form is `0x`-prefixed lowercase hex; input is
//! accepted with or without the prefix and in either case.

use std::fmt;
use std::str::FromStr;

use near_sdk::borsh::{BorshDeserialize, BorshSerialize};
use near_sdk::serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use near_sdk::AccountId;
use near_sdk_macros::NearSchema;

use crate::{keccak256, TypesError};

fn decode_hex(s: &str) -> Result<Vec<u8>, TypesError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| TypesError::InvalidHex(e.to_string()))
}

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
            BorshSerialize, BorshDeserialize, NearSchema,
        )]
        #[borsh(crate = "near_sdk::borsh")]
        #[abi(json, borsh)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;
            pub const ZERO: Self = Self([0u8; $len]);

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self, TypesError> {
                let arr: [u8; $len] =
                    bytes.try_into().map_err(|_| TypesError::InvalidLength {
                        expected: $len,
                        actual: bytes.len(),
                    })?;
                Ok(Self(arr))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(self, f)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_slice(&decode_hex(s)?)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = <String as Deserialize>::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// 20-byte account address derived from a secp256k1 public key.
    Address,
    20
);

fixed_bytes!(
    /// 32-byte hash. The zero hash means "absent" in the registry.
    Hash32,
    32
);

impl Address {
    /// Last 20 bytes of `keccak256` over the uncompressed 64-byte public key.
    pub fn from_public_key(public_key: &[u8; 64]) -> Self {
        let digest = keccak256(public_key);
        let mut out = [0u8; 20];
        out.copy_from_slice(&digest[12..]);
        Self(out)
    }

    /// Address form of a NEAR account. ETH-implicit ids (`0x` + 40 hex) map to
    /// their own bytes, named accounts to the tail of `keccak256(account_id)`.
    pub fn from_account_id(account_id: &AccountId) -> Self {
        let id = account_id.as_str();
        if id.len() == 42 && id.starts_with("0x") {
            if let Ok(address) = id.parse::<Address>() {
                return address;
            }
        }
        let digest = keccak256(id.as_bytes());
        let mut out = [0u8; 20];
        out.copy_from_slice(&digest[12..]);
        Self(out)
    }

    /// ETH-implicit NEAR account id owned by this address.
    pub fn to_account_id(&self) -> Result<AccountId, TypesError> {
        let id = self.to_string();
        id.parse()
            .map_err(|_| TypesError::InvalidAccountId(id.clone()))
    }
}

impl Hash32 {
    /// `keccak256` of the UTF-8 bytes, as used for DID strings and documents.
    pub fn of_str(s: &str) -> Self {
        Self(keccak256(s.as_bytes()))
    }
}

/// Opaque byte string carried as `0x` hex in JSON.
#[derive(Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize, NearSchema)]
#[borsh(crate = "near_sdk::borsh")]
#[abi(json, borsh)]
pub struct HexBytes(pub Vec<u8>);

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<HexBytes> for Vec<u8> {
    fn from(bytes: HexBytes) -> Self {
        bytes.0
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        decode_hex(&s).map(Self).map_err(de::Error::custom)
    }
}
