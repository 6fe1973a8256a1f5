use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use fialka_core::VERSION;

/// Fialka - file encryption with AES-GCM, keyed by a password or a key file
#[derive(Parser)]
#[command(name = "fialka")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Never prompt; fail if a password is needed and none was given
    #[arg(long, global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a file
    Encrypt(EncryptArgs),

    /// Decrypt a file
    Decrypt(DecryptArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `encrypt` command
#[derive(Args)]
pub struct EncryptArgs {
    /// File to encrypt
    #[arg(value_name = "INFILE")]
    pub infile: PathBuf,

    /// Output file (default: INFILE with the configured extension appended)
    #[arg(short, long, value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// Encryption password (prompted for when neither -p nor -k is given)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Key file; generated when it does not exist
    #[arg(short, long, value_name = "KEYFILE")]
    pub key_file: Option<PathBuf>,

    /// Replace the key file with a newly generated key
    #[arg(short, long)]
    pub force: bool,

    /// Cleartext stored with the file and covered by authentication
    #[arg(short = 'a', long = "ad", visible_alias = "authenticated-data", value_name = "TEXT")]
    pub associated_data: Option<String>,

    /// PBKDF2 iteration count
    #[arg(short, long)]
    pub iterations: Option<u32>,

    /// Key length in bits (128 or 256)
    #[arg(short, long, value_name = "BITS")]
    pub length: Option<u32>,

    /// Salt length in bits (128 to 1024, divisible by 8)
    #[arg(short, long, value_name = "BITS")]
    pub salt_length: Option<u32>,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// File to decrypt
    #[arg(value_name = "INFILE")]
    pub infile: PathBuf,

    /// Output file (default: INFILE without its last extension)
    #[arg(short, long, value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// Decryption password (prompted for when needed and not given)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Key file the input was encrypted with
    #[arg(short, long, value_name = "KEYFILE")]
    pub key_file: Option<PathBuf>,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_encrypt_flags() {
        let cli = Cli::parse_from([
            "fialka", "encrypt", "notes.txt", "-k", "notes.key", "-f", "-a", "hello", "-l", "128",
        ]);
        let Commands::Encrypt(args) = cli.command else {
            panic!("expected encrypt");
        };
        assert_eq!(args.infile, PathBuf::from("notes.txt"));
        assert_eq!(args.key_file, Some(PathBuf::from("notes.key")));
        assert!(args.force);
        assert_eq!(args.associated_data.as_deref(), Some("hello"));
        assert_eq!(args.length, Some(128));
    }

    #[test]
    fn test_verbose_counts() {
        let cli = Cli::parse_from(["fialka", "-vv", "decrypt", "notes.txt.aes"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Decrypt(_)));
    }
}
