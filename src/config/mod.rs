//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! functions.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated, immutable)
//!
//! process environment + .env
//!     → env.rs (captured once at startup)
//!     → Credentials / Environment passed into components
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{Credentials, Environment};
pub use loader::{load_config, ConfigError};
pub use schema::{ClientConfig, GistConfig, NetworkConfig, RequestDefaults};
