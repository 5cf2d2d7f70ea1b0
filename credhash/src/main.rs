//! Minimal CLI around the hasher. Commands are intentionally small so
//! operators can see exactly how credentials are handled.

use std::env;
use std::process::ExitCode;

use credhash::config::{load_config, HasherConfig};
use credhash::{CredentialHasher, HashError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "CREDHASH_CONFIG";

fn print_usage() -> ExitCode {
    eprintln!("Commands:\n  hash-password <plaintext>\n  verify-password <plaintext> <encoded-hash>\n  show-config");
    ExitCode::from(2)
}

fn init_logging(config: &HasherConfig) {
    let level = config.debug_level.as_deref().unwrap_or("warn");
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return print_usage();
    }

    let config = match env::var(CONFIG_ENV) {
        Ok(path) => match load_config(&path) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("config load failed: {err}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => HasherConfig::default(),
    };
    init_logging(&config);

    let hasher = match config.build() {
        Ok(hasher) => hasher,
        Err(err) => {
            error!("hasher setup failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(algorithm = %hasher.algorithm(), "hasher ready");

    match args[1].as_str() {
        "hash-password" => {
            if args.len() != 3 {
                return print_usage();
            }
            match hasher.hash(args[2].as_bytes()) {
                Ok(hash) => {
                    println!("{hash}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    error!(kind = err.kind(), "hashing failed: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        "verify-password" => {
            if args.len() != 4 {
                return print_usage();
            }
            match hasher.compare(&args[3], args[2].as_bytes()) {
                Ok(()) => {
                    println!("match");
                    ExitCode::SUCCESS
                }
                Err(HashError::Verification) => {
                    println!("no-match");
                    ExitCode::FAILURE
                }
                Err(err) => {
                    error!(kind = err.kind(), "verification failed: {err}");
                    println!("no-match");
                    ExitCode::FAILURE
                }
            }
        }
        "show-config" => match serde_json::to_string_pretty(&config) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("config serialization failed: {err}");
                ExitCode::FAILURE
            }
        },
        _ => print_usage(),
    }
}
