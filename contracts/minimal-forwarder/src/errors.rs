use near_sdk::{env, FunctionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwarderError {
    /// Recovery failed or the recovered signer is not `request.from`.
    InvalidSignature,
    /// `request.nonce` differs from the stored nonce.
    NonceReplay,
    InsufficientGas,
    InsufficientDeposit,
    InvalidInput(String),
}

impl FunctionError for ForwarderError {
    fn panic(&self) -> ! {
        env::panic_str(&format!("ForwarderError: {:?}", self))
    }
}
