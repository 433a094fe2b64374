use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keyseal::{KdfParams, envelope};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

mod auth;
mod output;

const LOG_ENV: &str = "KEYSEAL_LOG";

#[derive(Debug, clap::Args)]
struct Argon2Args {
    /// Argon2 memory cost in KiB (default: 65536)
    #[arg(long = "argon-mem", env = "KEYSEAL_ARGON_MEM")]
    mem_cost_kib: Option<u32>,

    /// Argon2 time cost / iterations (default: 3)
    #[arg(long = "argon-time", env = "KEYSEAL_ARGON_TIME")]
    time_cost: Option<u32>,

    /// Argon2 parallelism (default: 1)
    #[arg(long = "argon-parallelism", env = "KEYSEAL_ARGON_PARALLELISM")]
    parallelism: Option<u32>,
}

impl Argon2Args {
    fn to_kdf_params(&self) -> Result<KdfParams> {
        let default = KdfParams::default();

        KdfParams::new(
            self.mem_cost_kib.unwrap_or(default.mem_cost_kib()),
            self.time_cost.unwrap_or(default.time_cost()),
            self.parallelism.unwrap_or(default.parallelism()),
        )
        .context("invalid Argon2 parameters")
    }
}

#[derive(Debug, Parser)]
#[command(name = "keyseal")]
#[command(
    version,
    about = "Derive keys from passwords and seal files with authenticated encryption."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Derives a 256-bit key from a password (new random salt unless --salt is given)
    Derive {
        /// Hex-encoded 32-byte salt from an earlier derivation
        #[arg(long, value_name = "HEX")]
        salt: Option<String>,

        /// Print a JSON object instead of plain lines
        #[arg(long, default_value_t = false)]
        json: bool,

        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Encrypts a file into a password-sealed envelope
    #[command(arg_required_else_help = true)]
    Seal {
        input: PathBuf,

        /// Write the envelope here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        #[command(flatten)]
        argon2: Argon2Args,
    },

    /// Decrypts a password-sealed envelope
    #[command(arg_required_else_help = true)]
    Open {
        input: PathBuf,

        /// Write the plaintext here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct DerivedOutput<'a> {
    salt: &'a str,
    key: &'a str,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<Zeroizing<Vec<u8>>> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(Zeroizing::new(data))
}

fn derive(salt: Option<String>, json: bool, kdf: KdfParams) -> Result<()> {
    let (key, salt) = match salt {
        Some(salt_hex) => {
            let salt = hex::decode(salt_hex.trim()).context("salt is not valid hex")?;
            let password = auth::read_password()?;
            let key = keyseal::crypto::derive_key_with_params(&password, &salt, kdf)
                .context("key derivation failed")?;
            (key, salt)
        }
        None => {
            let password = auth::read_new_password_with_confirmation()?;
            let (key, salt) =
                keyseal::crypto::generate_key_with(&keyseal::OsRandom, &password, kdf)
                    .context("key derivation failed")?;
            (key, salt.to_vec())
        }
    };

    let salt_hex = hex::encode(&salt);
    let key_hex = Zeroizing::new(hex::encode(key.as_bytes()));

    if json {
        let out = Zeroizing::new(serde_json::to_string(&DerivedOutput {
            salt: &salt_hex,
            key: &key_hex,
        })?);
        println!("{}", out.as_str());
    } else {
        println!("salt: {salt_hex}");
        println!("key:  {}", key_hex.as_str());
    }

    Ok(())
}

fn main() -> Result<()> {
    init_logging();

    let args = Cli::parse();
    match args.command {
        Commands::Derive { salt, json, argon2 } => {
            let kdf = argon2.to_kdf_params()?;
            derive(salt, json, kdf)?;
        }
        Commands::Seal { input, out, argon2 } => {
            let kdf = argon2.to_kdf_params()?;
            let plaintext = read_input(&input)?;
            let password = auth::read_new_password_with_confirmation()?;

            let sealed =
                envelope::seal(&password, &plaintext, kdf).context("failed to seal input")?;
            output::emit(out.as_deref(), &sealed)?;
            info!(input = %input.display(), bytes = sealed.len(), "sealed");
        }
        Commands::Open { input, out } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let password = auth::read_password()?;

            let plaintext = envelope::open(&password, &data).context("failed to open envelope")?;
            output::emit(out.as_deref(), &plaintext)?;
            info!(input = %input.display(), bytes = plaintext.len(), "opened");
        }
    }

    Ok(())
}
