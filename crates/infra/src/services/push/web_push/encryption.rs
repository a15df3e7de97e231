use crate::services::push::PushError;
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes128Gcm, Nonce,
};
use hkdf::Hkdf;
use p256::{ecdh::diffie_hellman, elliptic_curve::sec1::ToEncodedPoint, PublicKey, SecretKey};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

/// Size of the single record every message is sent in
const RECORD_SIZE: u32 = 4096;
const SALT_LEN: usize = 16;
const TAG_LEN: usize = 16;
const PUBLIC_KEY_LEN: usize = 65;
const HEADER_LEN: usize = SALT_LEN + 4 + 1 + PUBLIC_KEY_LEN;
/// Push services only accept 4096 bytes in total
pub const MAX_PLAINTEXT_LEN: usize = RECORD_SIZE as usize - HEADER_LEN - TAG_LEN - 1;

/// Encrypts `plaintext` for the subscriber owning `ua_public` and `auth_secret`
/// with the `aes128gcm` content coding, using a fresh key pair and salt.
pub fn encrypt(ua_public: &[u8], auth_secret: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, PushError> {
    let as_secret = SecretKey::random(&mut OsRng);
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    encrypt_with(&as_secret, &salt, ua_public, auth_secret, plaintext)
}

struct ContentKeys {
    cek: [u8; 16],
    nonce: [u8; 12],
}

fn derive_keys(
    ecdh_secret: &[u8],
    auth_secret: &[u8],
    ua_public: &[u8],
    as_public: &[u8],
    salt: &[u8],
) -> Result<ContentKeys, PushError> {
    let expand_failed = |_| PushError::Encryption("Key derivation failed".into());

    let mut key_info = b"WebPush: info\0".to_vec();
    key_info.extend_from_slice(ua_public);
    key_info.extend_from_slice(as_public);
    let mut ikm = [0u8; 32];
    Hkdf::<Sha256>::new(Some(auth_secret), ecdh_secret)
        .expand(&key_info, &mut ikm)
        .map_err(expand_failed)?;

    let prk = Hkdf::<Sha256>::new(Some(salt), &ikm);
    let mut keys = ContentKeys {
        cek: [0u8; 16],
        nonce: [0u8; 12],
    };
    prk.expand(b"Content-Encoding: aes128gcm\0", &mut keys.cek)
        .map_err(expand_failed)?;
    prk.expand(b"Content-Encoding: nonce\0", &mut keys.nonce)
        .map_err(expand_failed)?;
    Ok(keys)
}

fn encrypt_with(
    as_secret: &SecretKey,
    salt: &[u8; SALT_LEN],
    ua_public: &[u8],
    auth_secret: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, PushError> {
    if plaintext.len() > MAX_PLAINTEXT_LEN {
        return Err(PushError::Encryption(format!(
            "The message is {} bytes, at most {} bytes can be sent",
            plaintext.len(),
            MAX_PLAINTEXT_LEN
        )));
    }
    if auth_secret.len() != 16 {
        return Err(PushError::InvalidSubscription(
            "The auth secret must be 16 bytes".into(),
        ));
    }
    let ua_key = PublicKey::from_sec1_bytes(ua_public)
        .map_err(|_| PushError::InvalidSubscription("The p256dh key is not a P-256 key".into()))?;
    let ua_public = ua_key.to_encoded_point(false);
    let as_public = as_secret.public_key().to_encoded_point(false);

    let shared = diffie_hellman(as_secret.to_nonzero_scalar(), ua_key.as_affine());
    let keys = derive_keys(
        shared.raw_secret_bytes(),
        auth_secret,
        ua_public.as_bytes(),
        as_public.as_bytes(),
        salt,
    )?;

    let mut record = Vec::with_capacity(plaintext.len() + 1);
    record.extend_from_slice(plaintext);
    // Delimiter of the last record
    record.push(2);

    let cipher = Aes128Gcm::new_from_slice(&keys.cek)
        .map_err(|e| PushError::Encryption(e.to_string()))?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&keys.nonce), record.as_slice())
        .map_err(|e| PushError::Encryption(e.to_string()))?;

    let mut body = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    body.extend_from_slice(salt);
    body.extend_from_slice(&RECORD_SIZE.to_be_bytes());
    body.push(PUBLIC_KEY_LEN as u8);
    body.extend_from_slice(as_public.as_bytes());
    body.extend_from_slice(&ciphertext);
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

    /// What the browser does with a received message
    fn decrypt(ua_secret: &SecretKey, auth_secret: &[u8], body: &[u8]) -> Vec<u8> {
        let salt = &body[..SALT_LEN];
        let record_size = u32::from_be_bytes(body[SALT_LEN..SALT_LEN + 4].try_into().unwrap());
        assert_eq!(record_size, RECORD_SIZE);
        assert_eq!(body[SALT_LEN + 4] as usize, PUBLIC_KEY_LEN);
        let as_public = &body[SALT_LEN + 5..HEADER_LEN];
        let ciphertext = &body[HEADER_LEN..];

        let as_key = PublicKey::from_sec1_bytes(as_public).unwrap();
        let shared = diffie_hellman(ua_secret.to_nonzero_scalar(), as_key.as_affine());
        let ua_public = ua_secret.public_key().to_encoded_point(false);
        let keys = derive_keys(
            shared.raw_secret_bytes(),
            auth_secret,
            ua_public.as_bytes(),
            as_public,
            salt,
        )
        .unwrap();
        let mut record = Aes128Gcm::new_from_slice(&keys.cek)
            .unwrap()
            .decrypt(Nonce::from_slice(&keys.nonce), ciphertext)
            .unwrap();
        assert_eq!(record.pop(), Some(2));
        record
    }

    fn subscriber() -> (SecretKey, Vec<u8>, [u8; 16]) {
        let secret = SecretKey::random(&mut OsRng);
        let public = secret.public_key().to_encoded_point(false).as_bytes().to_vec();
        let mut auth = [0u8; 16];
        OsRng.fill_bytes(&mut auth);
        (secret, public, auth)
    }

    #[test]
    fn it_encrypts_messages_the_subscriber_can_decrypt() {
        let (ua_secret, ua_public, auth) = subscriber();
        let plaintext = br#"{"title":"Reminder","body":"Water the plants"}"#;

        let body = encrypt(&ua_public, &auth, plaintext).unwrap();
        assert_eq!(body.len(), HEADER_LEN + plaintext.len() + 1 + TAG_LEN);
        assert_eq!(decrypt(&ua_secret, &auth, &body), plaintext.to_vec());
    }

    fn decode(value: &str) -> Vec<u8> {
        URL_SAFE_NO_PAD.decode(value).unwrap()
    }

    // Example from RFC 8291, appendix A
    #[test]
    fn it_matches_the_rfc_example() {
        let as_secret =
            SecretKey::from_slice(&decode("yfWPiYE-n46HLnH0KqZOF1fJJU3MYrct3AELtAQ-oRw")).unwrap();
        let salt: [u8; SALT_LEN] = decode("DGv6ra1nlYgDCS1FRnbzlw").try_into().unwrap();
        let ua_public = decode(
            "BCVxsr7N_eNgVRqvHtD0zTZsEc6-VV-JvLexhqUzORcxaOzi6-AYWXvTBHm4bjyPjs7Vd8pZGH6SRpkNtoIAiw4",
        );
        let auth = decode("BTBZMqHH6r4Tts7J_aSIgg");

        let body = encrypt_with(
            &as_secret,
            &salt,
            &ua_public,
            &auth,
            b"When I grow up, I want to be a watermelon",
        )
        .unwrap();

        let expected = decode(concat!(
            "DGv6ra1nlYgDCS1FRnbzlwAAEABBBP4z9KsN6nGRTbVYI_c7VJSPQTBtkgcy27mlmlMoZIIgDll6e3vCYLoc",
            "InmYWAmS6TlzAC8wEqKK6PBru3jl7A_yl95bQpu6cVPTpK4Mqgkf1CXztLVBSt2Ks3oZwbuwXPXLWyouBWLVW",
            "GNWQexSgSxsj_Qulcy4a-fN"
        ));
        assert_eq!(body, expected);
    }

    #[test]
    fn it_uses_a_fresh_key_for_every_message() {
        let (_, ua_public, auth) = subscriber();
        let first = encrypt(&ua_public, &auth, b"Test").unwrap();
        let second = encrypt(&ua_public, &auth, b"Test").unwrap();
        assert_ne!(first[..HEADER_LEN], second[..HEADER_LEN]);
    }

    #[test]
    fn it_rejects_unusable_subscriber_keys() {
        let (_, ua_public, auth) = subscriber();
        assert!(matches!(
            encrypt(&ua_public[..10], &auth, b"Test"),
            Err(PushError::InvalidSubscription(_))
        ));
        assert!(matches!(
            encrypt(&ua_public, &auth[..4], b"Test"),
            Err(PushError::InvalidSubscription(_))
        ));
    }

    #[test]
    fn it_accepts_every_payload_that_reminders_allow() {
        assert_eq!(MAX_PLAINTEXT_LEN, push_reminder_domain::MAX_PAYLOAD_BYTES);
    }

    #[test]
    fn it_rejects_messages_that_do_not_fit_a_record() {
        let (_, ua_public, auth) = subscriber();
        let max = vec![b'a'; MAX_PLAINTEXT_LEN];
        assert_eq!(encrypt(&ua_public, &auth, &max).unwrap().len(), 4096);
        let too_long = vec![b'a'; MAX_PLAINTEXT_LEN + 1];
        assert!(matches!(
            encrypt(&ua_public, &auth, &too_long),
            Err(PushError::Encryption(_))
        ));
    }
}
