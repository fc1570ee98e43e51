//! # Starkeeper - Identity Service Library
//!
//! Facade crate re-exporting the public APIs of the identity service components.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! starkeeper = { path = "../starkeeper" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `ClaimsPrincipal`, `ScopeSet`, etc.
//! - **Repository traits**: `UserStore`, `ApplicationStore`, `AuthorizationStore`
//! - **Application layer**: `Pipeline`, `Validator`, `AuthorizationNegotiator`
//! - **Adapters**: `PostgresUserStore`, `HashMapUserStore`, `HttpProfileClient`, etc.
//! - **Service**: `IdentityService` - the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use starkeeper_core::*;
}

pub use starkeeper_core::{
    AccountError, AuthorizationRequest, Claim, ClaimType, ClaimsPrincipal, CommandResult,
    Destination, Email, Failure, Password, ScopeSet, SignInDirective, UserAccount, UserId,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Store and service trait definitions
pub mod repositories {
    pub use starkeeper_core::{
        ApplicationStore, ApplicationStoreError, AuthorizationStore, AuthorizationStoreError,
        ProfileLookupError, ProfileProvider, UserStore, UserStoreError,
    };
}

pub use repositories::{ApplicationStore, AuthorizationStore, ProfileProvider, UserStore};

// ============================================================================
// Application Layer
// ============================================================================

/// Command pipeline, validation and use cases
pub mod application {
    pub use starkeeper_application::*;
}

pub use starkeeper_application::{
    AuthorizationNegotiator, CreateUserCommand, Pipeline, Validator, create_user_pipeline,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use starkeeper_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use starkeeper_adapters::persistence::*;
    }

    /// Profile providers
    pub mod profile {
        pub use starkeeper_adapters::profile::*;
    }

    /// Configuration
    pub mod config {
        pub use starkeeper_adapters::config::*;
    }
}

pub use starkeeper_adapters::{
    HashMapUserStore, HttpProfileClient, InMemoryApplicationStore, InMemoryAuthorizationStore,
    PasswordPolicy, PostgresUserStore, UserStoreProfileProvider,
};

// ============================================================================
// Identity Service (Main Entry Point)
// ============================================================================

pub use starkeeper_identity_service::{IdentityService, ServiceOptions, helpers};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing store traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
