use crate::{config::VapidConfig, services::push::PushError};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use p256::{elliptic_curve::sec1::ToEncodedPoint, SecretKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// How long a signed token is accepted by push services
const TOKEN_LIFETIME_SECS: i64 = 60 * 60 * 12;

// PKCS#8 wrapping of a P-256 private key, see RFC 5208 and RFC 5915
const PKCS8_PREFIX: [u8; 36] = [
    0x30, 0x81, 0x87, 0x02, 0x01, 0x00, 0x30, 0x13, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d,
    0x02, 0x01, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07, 0x04, 0x6d, 0x30,
    0x6b, 0x02, 0x01, 0x01, 0x04, 0x20,
];
const PKCS8_PUBLIC_KEY_PREFIX: [u8; 5] = [0xa1, 0x44, 0x03, 0x42, 0x00];

#[derive(Error, Debug)]
pub enum VapidKeyError {
    #[error("The VAPID private key is malformed: {0}")]
    MalformedPrivateKey(String),
    #[error("The VAPID public key does not belong to the private key")]
    MismatchedKeys,
    #[error("Unable to create the push client: {0}")]
    Client(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VapidClaims {
    pub aud: String,
    pub exp: i64,
    pub sub: String,
}

/// Signs the `Authorization` header that identifies this server to push services
pub struct VapidSigner {
    key: EncodingKey,
    public_key: String,
    subject: String,
}

pub(crate) fn decode_base64url(value: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(value.trim().trim_end_matches('='))
}

fn raw_private_key_to_pkcs8(scalar: &[u8], public_key: &[u8]) -> Vec<u8> {
    let mut der = Vec::with_capacity(138);
    der.extend_from_slice(&PKCS8_PREFIX);
    der.extend_from_slice(scalar);
    der.extend_from_slice(&PKCS8_PUBLIC_KEY_PREFIX);
    der.extend_from_slice(public_key);
    der
}

impl VapidSigner {
    pub fn new(config: &VapidConfig) -> Result<Self, VapidKeyError> {
        let key = if config.private_key.trim_start().starts_with("-----BEGIN") {
            EncodingKey::from_ec_pem(config.private_key.as_bytes())
                .map_err(|e| VapidKeyError::MalformedPrivateKey(e.to_string()))?
        } else {
            let scalar = decode_base64url(&config.private_key)
                .map_err(|e| VapidKeyError::MalformedPrivateKey(e.to_string()))?;
            let secret = SecretKey::from_slice(&scalar).map_err(|_| {
                VapidKeyError::MalformedPrivateKey("Not a P-256 private key".into())
            })?;
            let derived_public = secret.public_key().to_encoded_point(false);
            let configured_public = decode_base64url(&config.public_key)
                .map_err(|_| VapidKeyError::MismatchedKeys)?;
            if derived_public.as_bytes() != configured_public.as_slice() {
                return Err(VapidKeyError::MismatchedKeys);
            }
            EncodingKey::from_ec_der(&raw_private_key_to_pkcs8(
                &scalar,
                derived_public.as_bytes(),
            ))
        };

        let signer = Self {
            key,
            public_key: config.public_key.trim().to_string(),
            subject: config.subject.clone(),
        };
        // The key is only parsed when signing, so sign once up front
        signer
            .sign("https://push.example.com", 0)
            .map_err(|e| VapidKeyError::MalformedPrivateKey(e.to_string()))?;
        Ok(signer)
    }

    fn sign(&self, audience: &str, now_secs: i64) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = VapidClaims {
            aud: audience.to_string(),
            exp: now_secs + TOKEN_LIFETIME_SECS,
            sub: self.subject.clone(),
        };
        encode(&Header::new(Algorithm::ES256), &claims, &self.key)
    }

    /// Value of the `Authorization` header for a push to `endpoint`
    pub fn authorization(&self, endpoint: &Url, now_secs: i64) -> Result<String, PushError> {
        let audience = endpoint.origin().ascii_serialization();
        let token = self
            .sign(&audience, now_secs)
            .map_err(|e| PushError::Encryption(e.to_string()))?;
        Ok(format!("vapid t={}, k={}", token, self.public_key))
    }
}
