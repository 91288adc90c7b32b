/// Decoding error for the shared wire types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    InvalidHex(String),
    InvalidLength { expected: usize, actual: usize },
    InvalidSignature,
    InvalidAccountId(String),
    MalformedCall,
    Encoding(String),
}

impl std::fmt::Display for TypesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex(msg) => write!(f, "invalid hex: {msg}"),
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected} bytes, got {actual}")
            }
            Self::InvalidSignature => write!(f, "invalid secp256k1 signature"),
            Self::InvalidAccountId(id) => write!(f, "invalid account id: {id}"),
            Self::MalformedCall => write!(f, "malformed registry call"),
            Self::Encoding(msg) => write!(f, "encoding failed: {msg}"),
        }
    }
}

impl std::error::Error for TypesError {}
