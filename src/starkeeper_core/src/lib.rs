pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account_error::AccountError,
    authorization::{AuthorizationId, AuthorizationRecord, AuthorizationType},
    claims::{Claim, ClaimType, ClaimsPrincipal, Destination, destinations_for},
    client::{ApplicationId, ClientApplication},
    email::{Email, normalize_email},
    failure::{CommandResult, Failure},
    oauth::{AuthorizationRequest, ConsentView, SignInDirective},
    password::Password,
    profile::SubjectProfile,
    scope::{ScopeSet, scopes},
    user::{NewAccount, UserAccount, UserError, UserId},
};

pub use ports::{
    repositories::{
        ApplicationStore, ApplicationStoreError, AuthorizationStore, AuthorizationStoreError,
        IdentityError, UserStore, UserStoreError,
    },
    services::{ProfileLookupError, ProfileProvider},
};
