use near_sdk::{env, FunctionError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Effective caller lacks the required role.
    Unauthorized,
    /// The admin set may not become empty.
    LastAdmin,
    /// `relay_call` from an account other than the trusted forwarder.
    UntrustedForwarder,
    MalformedCall,
    InvalidInput(String),
}

impl FunctionError for RegistryError {
    fn panic(&self) -> ! {
        env::panic_str(&format!("RegistryError: {:?}", self))
    }
}
