use fialka_core::crypto::OsRandom;
use fialka_core::pipeline::{decrypt_file, Collaborators, DecryptReport, DecryptRequest};
use fialka_core::LocalFileStore;

use crate::app::{validate_decrypt_options, AppContext, DecryptOptions};
use crate::cli::DecryptArgs;
use crate::ui::{badge, format_bytes, kv, print, steps, Badge};

pub fn handle_decrypt(ctx: &AppContext, args: &DecryptArgs) -> anyhow::Result<()> {
    let request = validate_decrypt_options(DecryptOptions::from(args))?;

    let mut files = LocalFileStore::new();
    let mut prompt = ctx.prompt();
    let mut random = OsRandom;
    let mut collaborators = Collaborators {
        files: &mut files,
        prompt: &mut prompt,
        random: &mut random,
    };
    let report = decrypt_file(&request, &mut collaborators)?;

    let ui = ctx.ui_context();
    for notice in ignored_secret_notices(&request, &report) {
        print(&ui, &badge(&ui, Badge::Warn, &notice));
    }
    print(&ui, &steps(&ui, &step_lines(&request, &report)));

    // Associated data is output, not progress: shown even in quiet mode.
    if let Some(associated_data) = &report.associated_data {
        if ui.quiet {
            println!("{}", associated_data);
        } else {
            println!("{}", kv(&ui, "Authenticated data", associated_data));
        }
    }
    Ok(())
}

/// Secrets given on the command line that the container did not need.
fn ignored_secret_notices(request: &DecryptRequest, report: &DecryptReport) -> Vec<String> {
    let mut notices = Vec::new();
    match report.iterations {
        Some(_) => {
            if let Some(path) = &request.key_file {
                notices.push(format!(
                    "Ignored key file {}: this file was encrypted with a password",
                    path.display()
                ));
            }
        }
        None => {
            if request.password.is_some() {
                notices.push(
                    "Ignored password: this file was encrypted with a key file".to_string(),
                );
            }
        }
    }
    notices
}

fn step_lines(request: &DecryptRequest, report: &DecryptReport) -> Vec<String> {
    let bits = report.key_length.bits();
    let key_step = match (report.iterations, &request.key_file) {
        (Some(iterations), _) => format!(
            "Generated {} bit key from password using PBKDF2 with {} iterations",
            bits, iterations
        ),
        (None, Some(path)) => format!("Read {} bit key from {}", bits, path.display()),
        (None, None) => format!("Read {} bit key", bits),
    };

    vec![
        format!("Read encrypted file {}", request.input.display()),
        key_step,
        "Decrypted using AES-GCM".to_string(),
        format!(
            "Saved decrypted file to {} ({})",
            request.output.display(),
            format_bytes(report.plaintext_len as u64)
        ),
    ]
}
