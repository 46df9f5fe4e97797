use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hashpw::{DEFAULT_COST, Hash, Hasher, MatchResult, Salt, Version};
use serde::Serialize;
use std::process::ExitCode;
mod auth;

const EXIT_NO_MATCH: u8 = 1;
const EXIT_ERROR: u8 = 2;

#[derive(Debug, clap::Args)]
struct SaltArgs {
    /// bcrypt cost factor; values outside 4..=31 fall back to 12
    #[arg(long, env = "HASHPW_COST", default_value_t = i64::from(DEFAULT_COST), allow_negative_numbers = true)]
    cost: i64,

    /// Version marker for generated salts (2a, 2b or 2y)
    #[arg(long = "version-prefix", value_name = "VERSION", default_value = "2a")]
    salt_version: Version,
}

impl SaltArgs {
    fn hasher(&self) -> Hasher {
        Hasher::new().with_version(self.salt_version)
    }
}

#[derive(Debug, Parser)]
#[command(name = "hashpw")]
#[command(version, about = "Hash and verify passwords with bcrypt.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Prints a freshly generated salt
    Gensalt {
        #[command(flatten)]
        salt: SaltArgs,
    },

    /// Hashes a password read from HASHPW_PASSWORD, stdin or the terminal
    Hash {
        #[command(flatten)]
        salt: SaltArgs,

        /// Use this salt instead of generating one
        #[arg(long = "salt", value_name = "SALT")]
        with_salt: Option<String>,
    },

    /// Checks a password against a stored hash
    #[command(arg_required_else_help = true)]
    Verify { hash: String },

    /// Shows the parameters of a stored hash
    #[command(arg_required_else_help = true)]
    Inspect {
        hash: String,

        /// Print as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct HashInfo<'a> {
    version: &'a str,
    cost: u32,
    salt: &'a str,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: Cli) -> Result<ExitCode> {
    match args.command {
        Commands::Gensalt { salt } => {
            let generated = salt.hasher().generate_salt(salt.cost)?;
            println!("{generated}");
        }
        Commands::Hash { salt, with_salt } => {
            let hasher = salt.hasher();
            let salt = match with_salt {
                Some(text) => text.parse::<Salt>().context("invalid --salt")?,
                None => hasher.generate_salt(salt.cost)?,
            };
            let password = auth::read_new_password()?;
            let hash = hasher.hash(password.as_bytes(), salt)?;
            println!("{hash}");
        }
        Commands::Verify { hash } => {
            let password = auth::read_password()?;
            match Hasher::new().verify(password.as_bytes(), &hash)? {
                MatchResult::Match => println!("match"),
                MatchResult::NoMatch => {
                    println!("no match");
                    return Ok(ExitCode::from(EXIT_NO_MATCH));
                }
            }
        }
        Commands::Inspect { hash, json } => {
            let parsed: Hash = hash.parse().context("invalid hash")?;
            let info = HashInfo {
                version: parsed.version().as_str(),
                cost: parsed.cost().get(),
                salt: parsed.salt_str(),
            };
            if json {
                println!("{}", serde_json::to_string(&info)?);
            } else {
                println!("version  {}", info.version);
                println!("cost     {}", info.cost);
                println!("salt     {}", info.salt);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
