//! AES-GCM authenticated encryption.
//!
//! Nonces are 96 bits, tags 128 bits. The cipher variant (AES-128-GCM or
//! AES-256-GCM) follows the key length. Every encryption must use a fresh
//! nonce from [`generate_nonce`]; reusing a nonce under the same key breaks
//! both confidentiality and authenticity.

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm};
use zeroize::Zeroizing;

use crate::error::{FialkaError, Result};
use crate::traits::RandomSource;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-GCM tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Output of [`encrypt`]: ciphertext of the same length as the plaintext plus a detached tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

enum Cipher {
    Aes128(Box<Aes128Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl Cipher {
    fn new(key: &[u8]) -> Result<Self> {
        let invalid = |_| FialkaError::Crypto("Invalid AES key".to_string());
        match key.len() {
            16 => Aes128Gcm::new_from_slice(key)
                .map(|c| Cipher::Aes128(Box::new(c)))
                .map_err(invalid),
            32 => Aes256Gcm::new_from_slice(key)
                .map(|c| Cipher::Aes256(Box::new(c)))
                .map_err(invalid),
            other => Err(FialkaError::key_length(other, "128 or 256")),
        }
    }
}

/// Draw a fresh random nonce.
pub fn generate_nonce(random: &mut dyn RandomSource) -> Result<[u8; NONCE_LEN]> {
    let mut nonce = [0u8; NONCE_LEN];
    random.fill_bytes(&mut nonce)?;
    Ok(nonce)
}

/// Encrypt `plaintext` under `key`, authenticating `associated_data` too.
///
/// # Errors
///
/// Returns `FialkaError::KeyLength` if the key is not 16 or 32 bytes.
pub fn encrypt(
    key: &[u8],
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
    associated_data: Option<&[u8]>,
) -> Result<Sealed> {
    let cipher = Cipher::new(key)?;
    let nonce = GenericArray::from_slice(nonce);
    let aad = associated_data.unwrap_or_default();
    let mut buffer = Zeroizing::new(plaintext.to_vec());

    let tag = match &cipher {
        Cipher::Aes128(c) => c.encrypt_in_place_detached(nonce, aad, buffer.as_mut_slice()),
        Cipher::Aes256(c) => c.encrypt_in_place_detached(nonce, aad, buffer.as_mut_slice()),
    }
    .map_err(|_| FialkaError::Crypto("AES-GCM encryption failed".to_string()))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok(Sealed {
        ciphertext: std::mem::take(&mut *buffer),
        tag: tag_bytes,
    })
}

/// Verify and decrypt.
///
/// # Errors
///
/// Returns `FialkaError::Authentication` when the tag does not verify. The
/// error is the same whether the key, the ciphertext, the tag, the nonce or
/// the associated data is wrong, and no plaintext is returned.
pub fn decrypt(
    key: &[u8],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
    associated_data: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let cipher = Cipher::new(key)?;
    let nonce = GenericArray::from_slice(nonce);
    let tag = GenericArray::from_slice(tag);
    let aad = associated_data.unwrap_or_default();
    // Holds unverified plaintext if the tag check fails; wiped on drop.
    let mut buffer = Zeroizing::new(ciphertext.to_vec());

    match &cipher {
        Cipher::Aes128(c) => c.decrypt_in_place_detached(nonce, aad, buffer.as_mut_slice(), tag),
        Cipher::Aes256(c) => c.decrypt_in_place_detached(nonce, aad, buffer.as_mut_slice(), tag),
    }
    .map_err(|_| FialkaError::Authentication)?;

    Ok(std::mem::take(&mut *buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::OsRandom;
    use std::collections::HashSet;

    const KEY_256: [u8; 32] = [0x11; 32];
    const KEY_128: [u8; 16] = [0x22; 16];

    #[test]
    fn test_round_trip_both_key_sizes() {
        let nonce = [7u8; NONCE_LEN];
        for key in [&KEY_128[..], &KEY_256[..]] {
            let sealed = encrypt(key, &nonce, b"secret data", Some(b"header")).unwrap();
            assert_eq!(sealed.ciphertext.len(), b"secret data".len());
            assert_ne!(sealed.ciphertext.as_slice(), b"secret data");

            let plain =
                decrypt(key, &nonce, &sealed.ciphertext, &sealed.tag, Some(b"header")).unwrap();
            assert_eq!(plain, b"secret data");
        }
    }

    #[test]
    fn test_empty_plaintext() {
        let nonce = [0u8; NONCE_LEN];
        let sealed = encrypt(&KEY_256, &nonce, b"", None).unwrap();
        assert!(sealed.ciphertext.is_empty());
        assert_eq!(decrypt(&KEY_256, &nonce, b"", &sealed.tag, None).unwrap(), b"");
    }

    // NIST GCM test case 2: AES-128, zero key, zero IV, one zero block.
    #[test]
    fn test_known_answer_aes128() {
        let sealed = encrypt(&[0u8; 16], &[0u8; NONCE_LEN], &[0u8; 16], None).unwrap();
        assert_eq!(
            hex::encode(&sealed.ciphertext),
            "0388dace60b6a392f328c2b971b2fe78"
        );
        assert_eq!(hex::encode(sealed.tag), "ab6e47d42cec13bdf53a67b21257bddf");
    }

    #[test]
    fn test_absent_and_empty_associated_data_are_equivalent() {
        let nonce = [1u8; NONCE_LEN];
        let sealed = encrypt(&KEY_256, &nonce, b"data", None).unwrap();
        assert!(decrypt(&KEY_256, &nonce, &sealed.ciphertext, &sealed.tag, Some(b"")).is_ok());
    }

    #[test]
    fn test_tampering_fails_authentication() {
        let nonce = [3u8; NONCE_LEN];
        let sealed = encrypt(&KEY_256, &nonce, b"attack at dawn", Some(b"ad")).unwrap();

        let mut ciphertext = sealed.ciphertext.clone();
        ciphertext[0] ^= 0x01;
        let result = decrypt(&KEY_256, &nonce, &ciphertext, &sealed.tag, Some(b"ad"));
        assert!(matches!(result, Err(FialkaError::Authentication)));

        let mut tag = sealed.tag;
        tag[15] ^= 0x80;
        let result = decrypt(&KEY_256, &nonce, &sealed.ciphertext, &tag, Some(b"ad"));
        assert!(matches!(result, Err(FialkaError::Authentication)));

        let mut bad_nonce = nonce;
        bad_nonce[5] ^= 0x10;
        let result = decrypt(&KEY_256, &bad_nonce, &sealed.ciphertext, &sealed.tag, Some(b"ad"));
        assert!(matches!(result, Err(FialkaError::Authentication)));

        let result = decrypt(&KEY_256, &nonce, &sealed.ciphertext, &sealed.tag, Some(b"ae"));
        assert!(matches!(result, Err(FialkaError::Authentication)));

        let result = decrypt(&KEY_256, &nonce, &sealed.ciphertext, &sealed.tag, None);
        assert!(matches!(result, Err(FialkaError::Authentication)));
    }

    #[test]
    fn test_wrong_key_same_error_as_tampering() {
        let nonce = [3u8; NONCE_LEN];
        let sealed = encrypt(&KEY_256, &nonce, b"payload", None).unwrap();
        let wrong = decrypt(&[0x12; 32], &nonce, &sealed.ciphertext, &sealed.tag, None)
            .unwrap_err()
            .to_string();

        let mut tag = sealed.tag;
        tag[0] ^= 1;
        let tampered = decrypt(&KEY_256, &nonce, &sealed.ciphertext, &tag, None)
            .unwrap_err()
            .to_string();

        assert_eq!(wrong, tampered);
    }

    #[test]
    fn test_invalid_key_length_rejected() {
        let err = encrypt(&[0u8; 24], &[0u8; NONCE_LEN], b"x", None).unwrap_err();
        assert!(matches!(
            err,
            FialkaError::KeyLength {
                actual_bits: 192,
                ..
            }
        ));
    }

    #[test]
    fn test_generated_nonces_do_not_repeat() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_nonce(&mut OsRandom).unwrap()));
        }
    }
}
