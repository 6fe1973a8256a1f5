//! Container text → plaintext file.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use zeroize::Zeroizing;

use super::{prompts, Collaborators};
use crate::container::{self, Container, KeyMode};
use crate::crypto::{aead, derive_from_password, key_from_file_bytes, KeyLength, KeyMaterial};
use crate::error::{FialkaError, Result};
use crate::traits::{FileStore, SecretPrompt};

/// Input for [`decrypt_file`].
#[derive(Debug)]
pub struct DecryptRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Used for password-derived containers; prompted for when `None`
    pub password: Option<SecretString>,
    /// Required for containers sealed with a raw key
    pub key_file: Option<PathBuf>,
}

/// Summary of a finished decryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptReport {
    /// Associated data recorded in the container, now verified; `None` when
    /// absent or empty
    pub associated_data: Option<String>,
    pub plaintext_len: usize,
    pub key_length: KeyLength,
    /// PBKDF2 iterations when the key was derived from a password
    pub iterations: Option<u32>,
}

/// Decrypt the container at `request.input` into `request.output`.
///
/// The output is written only after the tag verifies; an authentication
/// failure leaves the file system untouched.
pub fn decrypt_file(
    request: &DecryptRequest,
    collaborators: &mut Collaborators<'_>,
) -> Result<DecryptReport> {
    let text = collaborators.files.read_text(&request.input)?;
    let container = container::deserialize(&text)?;
    tracing::debug!(
        input = %request.input.display(),
        password_derived = container.password_params().is_some(),
        "parsed container"
    );

    let key = resolve_decrypt_key(
        &container.key_mode,
        request.password.as_ref(),
        request.key_file.as_deref(),
        collaborators.files,
        collaborators.prompt,
    )?;

    let plaintext = open(&container, &key)?;
    collaborators.files.write_bytes(&request.output, &plaintext)?;
    tracing::debug!(output = %request.output.display(), bytes = plaintext.len(), "wrote plaintext");

    Ok(DecryptReport {
        associated_data: container
            .associated_data
            .clone()
            .filter(|value| !value.is_empty()),
        plaintext_len: plaintext.len(),
        key_length: key.length(),
        iterations: container.password_params().map(|params| params.iterations),
    })
}

/// Resolve the key a container was sealed with.
///
/// Password-derived containers use `password`, or a single prompt when it is
/// `None`; a supplied key file is ignored. Raw-key containers need
/// `key_file`, and any supplied password is ignored.
///
/// # Errors
///
/// - `FialkaError::KeyFileRequired` when a raw-key container has no key file
/// - `FialkaError::KeyLength` when the key file is not 128 or 256 bits
/// - `FialkaError::EmptyPassword` for an empty password
pub fn resolve_decrypt_key(
    key_mode: &KeyMode,
    password: Option<&SecretString>,
    key_file: Option<&Path>,
    files: &dyn FileStore,
    prompt: &mut dyn SecretPrompt,
) -> Result<KeyMaterial> {
    match key_mode {
        KeyMode::RawKey => {
            if password.is_some() {
                tracing::debug!("container was sealed with a key file; ignoring password");
            }
            let path = key_file.ok_or(FialkaError::KeyFileRequired)?;
            key_from_file_bytes(files.read_bytes(path)?)
        }
        KeyMode::PasswordDerived(params) => {
            if key_file.is_some() {
                tracing::debug!("container was sealed with a password; ignoring key file");
            }
            let prompted;
            let password = match password {
                Some(value) => value,
                None => {
                    prompted = prompt.prompt_secret(prompts::DECRYPT_PASSWORD)?;
                    &prompted
                }
            };
            derive_from_password(
                password.expose_secret(),
                &params.salt,
                params.iterations,
                params.length,
            )
        }
    }
}

/// Verify and decrypt a container's ciphertext.
///
/// The returned plaintext is wiped when dropped.
pub fn open(container: &Container, key: &KeyMaterial) -> Result<Zeroizing<Vec<u8>>> {
    aead::decrypt(
        key.as_bytes(),
        &container.nonce,
        &container.ciphertext,
        &container.tag,
        container.associated_data_bytes(),
    )
    .map(Zeroizing::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{encrypt_file, EncryptRequest, EncryptSecret, PasswordSettings};
    use crate::testing::{CountingRandom, MemoryFileStore, ScriptedPrompt};

    fn encrypted_store(secret: EncryptSecret, associated_data: Option<&str>) -> MemoryFileStore {
        let mut files = MemoryFileStore::default().with_file("plain.txt", b"attack at dawn");
        let mut prompt = ScriptedPrompt::default();
        let mut random = CountingRandom::default();
        let mut collaborators = Collaborators {
            files: &mut files,
            prompt: &mut prompt,
            random: &mut random,
        };
        let request = EncryptRequest {
            input: PathBuf::from("plain.txt"),
            output: PathBuf::from("plain.txt.aes"),
            secret,
            associated_data: associated_data.map(str::to_string),
        };
        encrypt_file(&request, &mut collaborators).unwrap();
        files
    }

    fn password_secret(password: &str) -> EncryptSecret {
        EncryptSecret::Password {
            password: Some(SecretString::from(password.to_string())),
            settings: PasswordSettings {
                iterations: 1000,
                ..PasswordSettings::default()
            },
        }
    }

    fn key_file_secret() -> EncryptSecret {
        EncryptSecret::KeyFile {
            path: PathBuf::from("my.key"),
            overwrite: false,
            length: None,
        }
    }

    fn request(password: Option<&str>, key_file: Option<&str>) -> DecryptRequest {
        DecryptRequest {
            input: PathBuf::from("plain.txt.aes"),
            output: PathBuf::from("restored.txt"),
            password: password.map(|p| SecretString::from(p.to_string())),
            key_file: key_file.map(PathBuf::from),
        }
    }

    fn run(
        files: &mut MemoryFileStore,
        prompt: &mut ScriptedPrompt,
        request: &DecryptRequest,
    ) -> Result<DecryptReport> {
        let mut random = CountingRandom::default();
        let mut collaborators = Collaborators {
            files,
            prompt,
            random: &mut random,
        };
        let report = decrypt_file(request, &mut collaborators);
        assert_eq!(random.bytes_drawn, 0);
        report
    }

    #[test]
    fn test_password_round_trip_reports_associated_data() {
        let mut files = encrypted_store(password_secret("test1234"), Some("from alice"));
        let mut prompt = ScriptedPrompt::default();

        let report = run(&mut files, &mut prompt, &request(Some("test1234"), None)).unwrap();

        assert_eq!(files.get("restored.txt").unwrap(), b"attack at dawn");
        assert_eq!(report.associated_data.as_deref(), Some("from alice"));
        assert_eq!(report.iterations, Some(1000));
        assert_eq!(report.key_length, KeyLength::Bits256);
        assert!(prompt.asked.is_empty());
    }

    #[test]
    fn test_password_prompted_once() {
        let mut files = encrypted_store(password_secret("test1234"), None);
        let mut prompt = ScriptedPrompt::new(&["test1234"]);

        run(&mut files, &mut prompt, &request(None, None)).unwrap();

        assert_eq!(prompt.asked, vec![prompts::DECRYPT_PASSWORD]);
    }

    #[test]
    fn test_wrong_password_writes_nothing() {
        let mut files = encrypted_store(password_secret("test1234"), None);
        let writes_before = files.writes;
        let mut prompt = ScriptedPrompt::default();

        let err = run(&mut files, &mut prompt, &request(Some("test12345"), None)).unwrap_err();

        assert!(matches!(err, FialkaError::Authentication));
        assert!(files.get("restored.txt").is_none());
        assert_eq!(files.writes, writes_before);
    }

    #[test]
    fn test_empty_password_rejected() {
        let mut files = encrypted_store(password_secret("test1234"), None);
        let mut prompt = ScriptedPrompt::new(&[""]);

        let err = run(&mut files, &mut prompt, &request(None, None)).unwrap_err();
        assert!(matches!(err, FialkaError::EmptyPassword));
    }

    #[test]
    fn test_key_file_round_trip() {
        let mut files = encrypted_store(key_file_secret(), None);
        let mut prompt = ScriptedPrompt::default();

        let report = run(&mut files, &mut prompt, &request(None, Some("my.key"))).unwrap();

        assert_eq!(files.get("restored.txt").unwrap(), b"attack at dawn");
        assert_eq!(report.iterations, None);
        assert_eq!(report.associated_data, None);
    }

    #[test]
    fn test_key_file_container_without_key_file() {
        let mut files = encrypted_store(key_file_secret(), None);
        let mut prompt = ScriptedPrompt::new(&["unused"]);

        let err = run(&mut files, &mut prompt, &request(Some("pw"), None)).unwrap_err();

        assert!(matches!(err, FialkaError::KeyFileRequired));
        assert!(prompt.asked.is_empty());
        assert!(files.get("restored.txt").is_none());
    }

    #[test]
    fn test_wrong_size_key_file_on_decrypt() {
        let mut files = encrypted_store(key_file_secret(), None);
        files.files.insert(PathBuf::from("short.key"), vec![0u8; 20]);
        let mut prompt = ScriptedPrompt::default();

        let err = run(&mut files, &mut prompt, &request(None, Some("short.key"))).unwrap_err();
        assert_eq!(err.to_string(), "Key has 160 bits, expected 128 or 256");
    }

    #[test]
    fn test_password_container_ignores_key_file() {
        let mut files = encrypted_store(password_secret("test1234"), None);
        let mut prompt = ScriptedPrompt::new(&["test1234"]);

        run(&mut files, &mut prompt, &request(None, Some("missing.key"))).unwrap();
        assert_eq!(prompt.asked.len(), 1);
    }

    #[test]
    fn test_tampered_associated_data_fails() {
        let mut files = encrypted_store(password_secret("test1234"), Some("from alice"));
        let tampered = files.text("plain.txt.aes").replace("from alice", "from mallory");
        files
            .files
            .insert(PathBuf::from("plain.txt.aes"), tampered.into_bytes());
        let mut prompt = ScriptedPrompt::default();

        let err = run(&mut files, &mut prompt, &request(Some("test1234"), None)).unwrap_err();
        assert!(matches!(err, FialkaError::Authentication));
    }

    #[test]
    fn test_empty_associated_data_reported_as_absent() {
        let mut files = encrypted_store(key_file_secret(), None);
        let mut sealed = container::deserialize(&files.text("plain.txt.aes")).unwrap();
        sealed.associated_data = Some(String::new());
        files.files.insert(
            PathBuf::from("plain.txt.aes"),
            container::serialize(&sealed).unwrap().into_bytes(),
        );
        let mut prompt = ScriptedPrompt::default();

        let report = run(&mut files, &mut prompt, &request(None, Some("my.key"))).unwrap();

        assert_eq!(files.get("restored.txt").unwrap(), b"attack at dawn");
        assert_eq!(report.associated_data, None);
    }

    #[test]
    fn test_open_returns_plaintext() {
        let files = encrypted_store(key_file_secret(), Some("note"));
        let sealed = container::deserialize(&files.text("plain.txt.aes")).unwrap();
        let key = key_from_file_bytes(files.get("my.key").unwrap().clone()).unwrap();

        let plaintext: Zeroizing<Vec<u8>> = open(&sealed, &key).unwrap();
        assert_eq!(plaintext.as_slice(), b"attack at dawn");
    }

    #[test]
    fn test_malformed_container_is_format_error() {
        let mut files = MemoryFileStore::default().with_file("plain.txt.aes", b"{\"nonce\":1}");
        let mut prompt = ScriptedPrompt::default();

        let err = run(&mut files, &mut prompt, &request(Some("pw"), None)).unwrap_err();
        assert!(matches!(err, FialkaError::Format(_)));
    }
}
