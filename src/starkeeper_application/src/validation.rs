//! Declarative, ordered validation of commands.
//!
//! A [`Validator`] holds one [`RuleChain`] per field. Each chain selects a string from
//! the command and runs its checks in declaration order; checks may be asynchronous
//! (for example a lookup against the identity store). All failing checks of all fields
//! are collected unless a chain is configured with [`Cascade::Stop`].

use async_trait::async_trait;
use regex::Regex;

/// A failed check, attributed to the field it was declared on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field: &'static str,
    pub message: String,
}

/// A single predicate over a field value.
#[async_trait]
pub trait Check: Send + Sync {
    async fn passes(&self, value: &str) -> bool;
}

/// Extracts the value a rule chain validates.
pub type Selector<C> = for<'a> fn(&'a C) -> &'a str;

/// What a chain does after one of its checks fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cascade {
    /// Keep evaluating the remaining checks.
    #[default]
    Continue,
    /// Skip the remaining checks of this chain.
    Stop,
}

pub struct RuleChain<C> {
    field: &'static str,
    selector: Selector<C>,
    message: String,
    cascade: Cascade,
    checks: Vec<Box<dyn Check>>,
}

impl<C> RuleChain<C> {
    pub fn for_field(field: &'static str, selector: Selector<C>) -> Self {
        Self {
            field,
            selector,
            message: format!("'{field}' is invalid"),
            cascade: Cascade::default(),
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: impl Check + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn not_empty(self) -> Self {
        self.check(NotEmpty)
    }

    pub fn min_length(self, min: usize) -> Self {
        self.check(MinLength(min))
    }

    pub fn matches(self, pattern: Regex) -> Self {
        self.check(Matches(pattern))
    }

    pub fn satisfies(self, predicate: fn(&str) -> bool) -> Self {
        self.check(Satisfies(predicate))
    }

    /// Message reported for every failing check of this chain.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn cascade(mut self, cascade: Cascade) -> Self {
        self.cascade = cascade;
        self
    }

    async fn evaluate(&self, command: &C, failures: &mut Vec<ValidationFailure>)
    where
        C: Sync,
    {
        let value = (self.selector)(command);
        for check in &self.checks {
            if check.passes(value).await {
                continue;
            }
            failures.push(ValidationFailure {
                field: self.field,
                message: self.message.clone(),
            });
            if self.cascade == Cascade::Stop {
                break;
            }
        }
    }
}

pub struct Validator<C> {
    chains: Vec<RuleChain<C>>,
}

impl<C: Sync> Validator<C> {
    pub fn new() -> Self {
        Self { chains: Vec::new() }
    }

    pub fn rule(mut self, chain: RuleChain<C>) -> Self {
        self.chains.push(chain);
        self
    }

    /// Runs every chain in declaration order. An empty result means the command is valid.
    pub async fn validate(&self, command: &C) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for chain in &self.chains {
            chain.evaluate(command, &mut failures).await;
        }
        failures
    }
}

impl<C: Sync> Default for Validator<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fails on empty or whitespace-only values.
pub struct NotEmpty;

#[async_trait]
impl Check for NotEmpty {
    async fn passes(&self, value: &str) -> bool {
        !value.trim().is_empty()
    }
}

/// Fails when the value has fewer than the given number of characters.
pub struct MinLength(pub usize);

#[async_trait]
impl Check for MinLength {
    async fn passes(&self, value: &str) -> bool {
        value.chars().count() >= self.0
    }
}

pub struct Matches(pub Regex);

#[async_trait]
impl Check for Matches {
    async fn passes(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

pub struct Satisfies(pub fn(&str) -> bool);

#[async_trait]
impl Check for Satisfies {
    async fn passes(&self, value: &str) -> bool {
        (self.0)(value)
    }
}
