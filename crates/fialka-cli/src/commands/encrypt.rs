use fialka_core::crypto::OsRandom;
use fialka_core::pipeline::{
    encrypt_file, Collaborators, EncryptReport, EncryptRequest, EncryptSecret, KeyResolution,
};
use fialka_core::LocalFileStore;

use crate::app::{validate_encrypt_options, AppContext, EncryptOptions};
use crate::cli::EncryptArgs;
use crate::ui::{format_bytes, print, steps};

pub fn handle_encrypt(ctx: &AppContext, args: &EncryptArgs) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let request = validate_encrypt_options(EncryptOptions::from(args), &config)?;

    let mut files = LocalFileStore::new();
    let mut prompt = ctx.prompt();
    let mut random = OsRandom;
    let mut collaborators = Collaborators {
        files: &mut files,
        prompt: &mut prompt,
        random: &mut random,
    };
    let report = encrypt_file(&request, &mut collaborators)?;

    let ui = ctx.ui_context();
    print(&ui, &steps(&ui, &step_lines(&request, &report)));
    Ok(())
}

fn step_lines(request: &EncryptRequest, report: &EncryptReport) -> Vec<String> {
    let bits = report.key_length.bits();
    let key_step = match (&request.secret, report.resolution) {
        (_, KeyResolution::DerivedFromPassword { iterations }) => format!(
            "Generated {} bit key from password using PBKDF2 with {} iterations",
            bits, iterations
        ),
        (EncryptSecret::KeyFile { path, .. }, KeyResolution::LoadedKeyFile) => {
            format!("Read {} bit key from {}", bits, path.display())
        }
        (EncryptSecret::KeyFile { path, .. }, KeyResolution::GeneratedKeyFile) => {
            format!("Generated {} bit key and saved it to {}", bits, path.display())
        }
        (EncryptSecret::Password { .. }, _) => format!("Prepared {} bit key", bits),
    };

    vec![
        format!(
            "Read {} ({})",
            request.input.display(),
            format_bytes(report.plaintext_len as u64)
        ),
        key_step,
        "Encrypted using AES-GCM".to_string(),
        format!("Saved encrypted file to {}", request.output.display()),
    ]
}
