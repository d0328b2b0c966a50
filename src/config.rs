use anyhow::{Context, Result};
use clap::Parser;
use std::{env, path::PathBuf};

use crate::identity::DEFAULT_IDENTITY_HEADER;

const ENV_PREFIX: &str = "CAR_RENTAL_";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Header carrying the authenticated customer's email.
    pub identity_header: String,
    /// Recipient of contact-form messages.
    pub contact_email: String,
    /// Sender address on outgoing mail.
    pub from_email: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            database_url: "sqlite://./data/car_rental.db".into(),
            identity_header: DEFAULT_IDENTITY_HEADER.into(),
            contact_email: "admin@carrentaldemo.com".into(),
            from_email: "noreply@carrentaldemo.com".into(),
        }
    }
}

/// One-shot actions requested on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupActions {
    /// Apply the schema and exit.
    pub migrate: bool,
    /// JSON array of vehicles to add before serving.
    pub seed_catalog: Option<PathBuf>,
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Car rental booking and payment API")]
pub struct Args {
    /// Host to bind to (overrides CAR_RENTAL_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides CAR_RENTAL_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides CAR_RENTAL_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Identity header name (overrides CAR_RENTAL_IDENTITY_HEADER)
    #[arg(long)]
    pub identity_header: Option<String>,

    /// Contact form recipient (overrides CAR_RENTAL_CONTACT_EMAIL)
    #[arg(long)]
    pub contact_email: Option<String>,

    /// Sender address for outgoing mail (overrides CAR_RENTAL_FROM_EMAIL)
    #[arg(long)]
    pub from_email: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,

    /// Load vehicles from a JSON file before serving
    #[arg(long, value_name = "PATH")]
    pub seed_catalog: Option<PathBuf>,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and startup actions.
    pub fn from_env_and_args() -> Result<(Self, StartupActions)> {
        Self::resolve(Args::parse(), |key| env::var(key).ok())
    }

    /// Merge `args` over values from `lookup` (keyed by full variable name)
    /// over defaults.
    pub fn resolve(
        args: Args,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, StartupActions)> {
        let defaults = Self::default();
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        // --- Environment fallback ---
        let env_port = match var("PORT") {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing {ENV_PREFIX}PORT value `{value}`"))?,
            None => defaults.port,
        };

        // --- Merge ---
        let cfg = Self {
            host: args
                .host
                .or_else(|| var("HOST"))
                .unwrap_or(defaults.host),
            port: args.port.unwrap_or(env_port),
            database_url: args
                .database_url
                .or_else(|| var("DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            identity_header: args
                .identity_header
                .or_else(|| var("IDENTITY_HEADER"))
                .unwrap_or(defaults.identity_header),
            contact_email: args
                .contact_email
                .or_else(|| var("CONTACT_EMAIL"))
                .unwrap_or(defaults.contact_email),
            from_email: args
                .from_email
                .or_else(|| var("FROM_EMAIL"))
                .unwrap_or(defaults.from_email),
        };

        let actions = StartupActions {
            migrate: args.migrate,
            seed_catalog: args.seed_catalog,
        };
        Ok((cfg, actions))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
