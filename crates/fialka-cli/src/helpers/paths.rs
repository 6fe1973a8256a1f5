use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// `<input>.<extension>`, keeping any extension the input already has.
pub fn default_encrypt_output(input: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// The input path with its last extension removed.
pub fn default_decrypt_output(input: &Path) -> anyhow::Result<PathBuf> {
    if input.extension().is_none() {
        return Err(anyhow::anyhow!(
            "Cannot derive an output name from {}; use -o to choose one",
            input.display()
        ));
    }
    Ok(input.with_extension(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_output_appends_extension() {
        assert_eq!(
            default_encrypt_output(Path::new("docs/report.pdf"), "aes"),
            PathBuf::from("docs/report.pdf.aes")
        );
        assert_eq!(
            default_encrypt_output(Path::new("README"), "enc"),
            PathBuf::from("README.enc")
        );
    }

    #[test]
    fn test_decrypt_output_strips_last_extension() {
        assert_eq!(
            default_decrypt_output(Path::new("docs/report.pdf.aes")).unwrap(),
            PathBuf::from("docs/report.pdf")
        );
        assert_eq!(
            default_decrypt_output(Path::new("secret.aes")).unwrap(),
            PathBuf::from("secret")
        );
    }

    #[test]
    fn test_decrypt_output_needs_extension() {
        assert!(default_decrypt_output(Path::new("noext")).is_err());
    }
}
