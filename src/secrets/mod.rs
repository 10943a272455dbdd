//! Remote secrets hosting and reference encryption.
//!
//! # Data Flow
//! ```text
//! offchain-encrypted-secrets.json (ciphertext produced off-line)
//!     → gist.rs        upload as a private gist, get its raw URL
//!     → encryption.rs  encrypt the URL for the DON (ECIES, secp256k1)
//!     → EncryptedSecretsReference (consumed once by the submitter)
//! ```
//!
//! The gist outlives this process. It has to be removed with `delete-gist`.

pub mod encryption;
pub mod gist;
pub mod resolver;

pub use encryption::DonSecretsEncryptor;
pub use gist::GistClient;
pub use resolver::SecretsReferenceResolver;

use alloy::primitives::Bytes;

use crate::error::FunctionsResult;

/// Encrypted pointer to remotely hosted secrets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptedSecretsReference {
    /// Where the encrypted secrets are hosted.
    pub urls: Vec<String>,
    /// The URLs, encrypted for the DON.
    pub encrypted: Bytes,
}

impl EncryptedSecretsReference {
    /// Reference sent by requests that carry no secrets.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.encrypted.is_empty()
    }
}

/// Remote snippet store used to host encrypted secrets.
#[allow(async_fn_in_trait)]
pub trait GistStore {
    /// Upload `content` and return a URL the DON can fetch.
    async fn create_gist(&self, content: &str) -> FunctionsResult<String>;

    /// Delete a previously created gist. `false` means the store refused.
    async fn delete_gist(&self, gist_url: &str) -> FunctionsResult<bool>;
}

/// Encrypts secrets URLs so only the DON can read them.
#[allow(async_fn_in_trait)]
pub trait SecretsEncryptor {
    async fn encrypt_secrets_urls(&self, urls: &[String]) -> FunctionsResult<Bytes>;
}
