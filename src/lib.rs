#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the authflow library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod errors;
pub mod factory;
pub mod machine;
pub mod models;
pub mod repository;
pub mod settings;
pub mod store;
pub mod usecases;
pub mod validation;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use client::{ApiError, AuthApiClient, HttpAuthApiClient};
pub use errors::{AuthError, AuthResult};
pub use factory::{AuthStack, AuthStackFactory};
pub use machine::{LoginEffect, LoginIntent, LoginState, LoginStateMachine};
pub use models::{AuthToken, Credentials, UserProfile};
pub use repository::AuthRepository;
pub use settings::AuthflowSettings;
pub use store::{FileTokenStore, InMemoryTokenStore, TokenStore};
