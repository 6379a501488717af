use crate::config::Settings;

use anyhow::{bail, Context};
use licensing_ecc::{verify_hex, Keypair, Signature};
use structopt::StructOpt;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, StructOpt)]
#[structopt(name = "licensing-keytool", about = "secp256k1 keys and signatures for licenses")]
pub struct Opt {
    #[structopt(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Creates a new private and public key
    Generate {
        #[structopt(long, parse(from_os_str), help = "json file where the keys are written")]
        out: Option<PathBuf>,
    },
    /// Prints the public key belonging to a private key
    PublicKey {
        #[structopt(long, help = "hex private key, defaults to LICENSE_PRIVATE_KEY")]
        private_key: Option<String>,
    },
    /// Signs the contents of a file
    Sign {
        #[structopt(long, parse(from_os_str), help = "file to be signed")]
        message: PathBuf,
        #[structopt(long, help = "hex private key, defaults to LICENSE_PRIVATE_KEY")]
        private_key: Option<String>,
    },
    /// Checks a signature over the contents of a file
    Verify {
        #[structopt(long, parse(from_os_str), help = "file that was signed")]
        message: PathBuf,
        #[structopt(long, help = "hex signature")]
        signature: String,
        #[structopt(long, help = "hex public key")]
        public_key: String,
    },
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct KeyFile {
    pub private_key: String,
    pub public_key: String,
}

pub fn run<W: Write>(cmd: Command, settings: &Settings, out: &mut W) -> anyhow::Result<()> {
    match cmd {
        Command::Generate { out: path } => generate(Keypair::generate(), path.as_deref(), out),
        Command::PublicKey { private_key } => {
            let keypair = keypair(private_key, settings)?;
            writeln!(out, "{}", keypair.public_key())?;
            Ok(())
        }
        Command::Sign {
            message,
            private_key,
        } => {
            let keypair = keypair(private_key, settings)?;
            let contents = read_message(&message)?;
            writeln!(out, "{}", keypair.sign([contents]))?;
            Ok(())
        }
        Command::Verify {
            message,
            signature,
            public_key,
        } => {
            let contents = read_message(&message)?;
            if !check(&contents, &signature, &public_key) {
                bail!("signature is not valid for {}", message.display());
            }
            writeln!(out, "signature is valid")?;
            Ok(())
        }
    }
}

pub fn generate<W: Write>(keypair: Keypair, path: Option<&Path>, out: &mut W) -> anyhow::Result<()> {
    let key_file = KeyFile {
        private_key: keypair.private_key().to_hex(),
        public_key: keypair.public_key().to_hex(),
    };
    writeln!(out, "private key: {}", key_file.private_key)?;
    writeln!(out, "public key:  {}", key_file.public_key)?;

    if let Some(path) = path {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &key_file)?;
        log::info!("keys written to {}", path.display());
    }
    Ok(())
}

fn keypair(private_key: Option<String>, settings: &Settings) -> anyhow::Result<Keypair> {
    let hex_key = match private_key.or_else(|| settings.private_key.clone()) {
        Some(key) => key,
        None => bail!("no private key, pass --private-key or set LICENSE_PRIVATE_KEY"),
    };
    Ok(Keypair::from_hex(&hex_key)?)
}

fn read_message(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn check(message: &[u8], signature_hex: &str, public_key_hex: &str) -> bool {
    match Signature::from_hex(signature_hex) {
        Ok(signature) => verify_hex([message], &signature.to_bytes(), public_key_hex),
        Err(e) => {
            log::warn!("malformed signature: {}", e);
            false
        }
    }
}
