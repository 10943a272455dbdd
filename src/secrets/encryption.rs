//! Secrets URL encryption for the DON.
//!
//! The URLs are joined with spaces and ECIES-encrypted to the DON's
//! secp256k1 public key. The DON splits the decrypted text on spaces.
//!
//! Ciphertext layout: `iv (16) ‖ ephemeral key, compressed (33) ‖ mac (32) ‖ aes-256-cbc body`.
//! The MAC is HMAC-SHA256 over `iv ‖ ephemeral key, uncompressed (65) ‖ body`.
//! Both keys come from `sha512(ecdh_x)`: the first half encrypts, the second half authenticates.

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use alloy::primitives::{Address, Bytes};
use hmac::{Hmac, Mac};
use k256::ecdh::EphemeralSecret;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};

use crate::blockchain::client::ChainClient;
use crate::blockchain::contracts::FunctionsCoordinator;
use crate::error::{FunctionsError, FunctionsResult};
use crate::secrets::SecretsEncryptor;
use crate::subscription::RouterSubscriptions;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Encrypts secrets URLs to the public key published by the DON coordinator.
#[derive(Debug, Clone)]
pub struct DonSecretsEncryptor {
    client: ChainClient,
    subscriptions: RouterSubscriptions,
    don_id: String,
}

impl DonSecretsEncryptor {
    pub fn new(client: ChainClient, subscriptions: RouterSubscriptions, don_id: String) -> Self {
        Self {
            client,
            subscriptions,
            don_id,
        }
    }

    /// Fetch the DON's public key from its coordinator.
    pub async fn don_public_key(&self) -> FunctionsResult<PublicKey> {
        let coordinator: Address = self.subscriptions.coordinator(&self.don_id).await?;
        let contract = FunctionsCoordinator::new(coordinator, self.client.provider().clone());
        let raw = self
            .client
            .call("getDONPublicKey", contract.getDONPublicKey().call())
            .await?;
        parse_public_key(&raw)
    }
}

impl SecretsEncryptor for DonSecretsEncryptor {
    async fn encrypt_secrets_urls(&self, urls: &[String]) -> FunctionsResult<Bytes> {
        let don_key = self.don_public_key().await?;
        let encrypted = encrypt_urls(&don_key, urls)?;

        tracing::debug!(urls = urls.len(), bytes = encrypted.len(), "Encrypted secrets URLs");
        Ok(Bytes::from(encrypted))
    }
}

/// Encrypt the space-joined `urls` to `reader`.
pub fn encrypt_urls(reader: &PublicKey, urls: &[String]) -> FunctionsResult<Vec<u8>> {
    if urls.is_empty() {
        return Err(FunctionsError::Encryption("no secrets URLs to encrypt".to_string()));
    }
    encrypt(reader, urls.join(" ").as_bytes())
}

/// Parse a secp256k1 key given as raw `x ‖ y` (64 bytes) or SEC1.
pub fn parse_public_key(raw: &[u8]) -> FunctionsResult<PublicKey> {
    let sec1 = if raw.len() == 64 {
        let mut prefixed = Vec::with_capacity(65);
        prefixed.push(0x04);
        prefixed.extend_from_slice(raw);
        prefixed
    } else {
        raw.to_vec()
    };
    PublicKey::from_sec1_bytes(&sec1)
        .map_err(|_| FunctionsError::Encryption(format!("invalid DON public key ({} bytes)", raw.len())))
}

/// ECIES-encrypt `plaintext` to `reader`.
pub fn encrypt(reader: &PublicKey, plaintext: &[u8]) -> FunctionsResult<Vec<u8>> {
    let ephemeral = EphemeralSecret::random(&mut OsRng);
    let ephemeral_public = ephemeral.public_key();
    let shared = ephemeral.diffie_hellman(reader);

    let keys = Sha512::digest(shared.raw_secret_bytes());
    let (encryption_key, mac_key) = keys.split_at(32);

    let mut iv = [0u8; 16];
    OsRng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new_from_slices(encryption_key, &iv)
        .map_err(|e| FunctionsError::Encryption(e.to_string()))?
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    let uncompressed = ephemeral_public.to_encoded_point(false);
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(mac_key)
        .map_err(|e| FunctionsError::Encryption(e.to_string()))?;
    mac.update(&iv);
    mac.update(uncompressed.as_bytes());
    mac.update(&ciphertext);
    let tag = mac.finalize().into_bytes();

    let compressed = ephemeral_public.to_encoded_point(true);
    let mut out = Vec::with_capacity(16 + 33 + 32 + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(compressed.as_bytes());
    out.extend_from_slice(&tag);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::BlockDecryptMut;
    use k256::SecretKey;

    type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

    fn decrypt(secret: &SecretKey, data: &[u8]) -> Vec<u8> {
        let (iv, rest) = data.split_at(16);
        let (ephemeral, rest) = rest.split_at(33);
        let (tag, ciphertext) = rest.split_at(32);

        let ephemeral = PublicKey::from_sec1_bytes(ephemeral).unwrap();
        let shared = k256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), ephemeral.as_affine());
        let keys = Sha512::digest(shared.raw_secret_bytes());
        let (encryption_key, mac_key) = keys.split_at(32);

        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(mac_key).unwrap();
        mac.update(iv);
        mac.update(ephemeral.to_encoded_point(false).as_bytes());
        mac.update(ciphertext);
        mac.verify_slice(tag).expect("mac mismatch");

        Aes256CbcDec::new_from_slices(encryption_key, iv)
            .unwrap()
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .unwrap()
    }

    #[test]
    fn test_reader_recovers_payload() {
        let secret = SecretKey::random(&mut OsRng);
        let message = b"https://gist.github.com/u/abc/raw";

        let encrypted = encrypt(&secret.public_key(), message).unwrap();
        // iv + compressed key + mac + at least one block
        assert!(encrypted.len() >= 16 + 33 + 32 + 16);
        assert_eq!(encrypted.len() % 16, (16 + 33 + 32) % 16);
        assert_eq!(decrypt(&secret, &encrypted), message.to_vec());
    }

    #[test]
    fn test_urls_are_encrypted_as_plain_text() {
        let secret = SecretKey::random(&mut OsRng);
        let urls = vec![
            "https://gist.github.com/a/1/raw".to_string(),
            "https://gist.github.com/b/2/raw".to_string(),
        ];

        let encrypted = encrypt_urls(&secret.public_key(), &urls).unwrap();
        assert_eq!(
            String::from_utf8(decrypt(&secret, &encrypted)).unwrap(),
            "https://gist.github.com/a/1/raw https://gist.github.com/b/2/raw"
        );
    }

    #[test]
    fn test_no_urls_is_an_error() {
        let secret = SecretKey::random(&mut OsRng);
        assert!(matches!(
            encrypt_urls(&secret.public_key(), &[]),
            Err(FunctionsError::Encryption(_))
        ));
    }

    #[test]
    fn test_fresh_ephemeral_key_per_call() {
        let secret = SecretKey::random(&mut OsRng);
        let a = encrypt(&secret.public_key(), b"same").unwrap();
        let b = encrypt(&secret.public_key(), b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_public_key_forms() {
        let secret = SecretKey::random(&mut OsRng);
        let public = secret.public_key();
        let uncompressed = public.to_encoded_point(false);

        // Raw x || y as published by the coordinator
        let raw = &uncompressed.as_bytes()[1..];
        assert_eq!(parse_public_key(raw).unwrap(), public);
        assert_eq!(parse_public_key(uncompressed.as_bytes()).unwrap(), public);
        assert!(parse_public_key(&[1, 2, 3]).is_err());
    }
}
