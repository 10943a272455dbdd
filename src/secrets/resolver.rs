//! Turns a local encrypted-secrets bundle into a reference the DON can fetch.

use crate::config::env::GITHUB_API_TOKEN_ENV_VAR;
use crate::error::{FunctionsError, FunctionsResult};
use crate::request::types::Location;
use crate::secrets::{EncryptedSecretsReference, GistStore, SecretsEncryptor};

/// Hosts encrypted secrets and encrypts their location.
///
/// `gists` is `None` when no upload token is configured; Remote resolution
/// then fails before any upload is attempted.
pub struct SecretsReferenceResolver<G, E> {
    gists: Option<G>,
    encryptor: E,
}

impl<G, E> SecretsReferenceResolver<G, E>
where
    G: GistStore,
    E: SecretsEncryptor,
{
    pub fn new(gists: Option<G>, encryptor: E) -> Self {
        Self { gists, encryptor }
    }

    /// Resolve `bundle` (encrypted secrets JSON) for `location`.
    ///
    /// Upload errors are fatal; nothing is retried.
    pub async fn resolve(
        &self,
        location: Location,
        bundle: &str,
    ) -> FunctionsResult<EncryptedSecretsReference> {
        match location {
            Location::Remote => {}
            other => return Err(FunctionsError::UnsupportedLocation(other)),
        }

        let gists = self
            .gists
            .as_ref()
            .ok_or(FunctionsError::MissingCredential(GITHUB_API_TOKEN_ENV_VAR))?;

        let gist_url = gists.create_gist(bundle).await?;
        let encrypted = self
            .encryptor
            .encrypt_secrets_urls(std::slice::from_ref(&gist_url))
            .await?;

        Ok(EncryptedSecretsReference {
            urls: vec![gist_url],
            encrypted,
        })
    }
}
