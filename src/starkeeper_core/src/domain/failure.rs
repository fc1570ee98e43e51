use std::fmt;

use super::account_error::AccountError;

/// Outcome of dispatching a command: the handler's value, or the reasons it was refused.
pub type CommandResult<T> = Result<T, Failure>;

/// Non-empty, ordered list of human-readable failure messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    messages: Vec<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    /// Builds a failure from a list of messages, or `None` if the list is empty.
    pub fn from_messages<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            None
        } else {
            Some(Self { messages })
        }
    }

    /// Like [`Failure::from_messages`], keeping only the first occurrence of each message.
    pub fn distinct<I, S>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for message in messages.into_iter().map(Into::into) {
            if !distinct.contains(&message) {
                distinct.push(message);
            }
        }
        Self::from_messages(distinct)
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// True when the refusal stems from an internal fault rather than the input.
    pub fn is_unexpected(&self) -> bool {
        self.contains(AccountError::Unexpected.message())
    }
}

impl From<AccountError> for Failure {
    fn from(error: AccountError) -> Self {
        Self::new(error.message())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("; "))
    }
}

impl std::error::Error for Failure {}
