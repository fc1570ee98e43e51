use std::fmt;

/// User-visible registration failures with their stable codes.
///
/// Malformed and already-registered emails share `InvalidEmailAddress` so callers
/// cannot probe which addresses have accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountError {
    InvalidEmailAddress,
    WeakPassword,
    Unexpected,
}

impl AccountError {
    pub const fn code(self) -> u16 {
        match self {
            AccountError::InvalidEmailAddress => 100,
            AccountError::WeakPassword => 101,
            AccountError::Unexpected => 102,
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            AccountError::InvalidEmailAddress => "Invalid email address",
            AccountError::WeakPassword => "Weak password",
            AccountError::Unexpected => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for AccountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
