//! CLI entry point for the profile store.
//!
//! # Responsibility
//! - Verify `profiledesk_core` linkage with a deterministic probe.
//! - Inspect or seed a local SQLite profile store.
//!
//! # Usage
//! - `profiledesk_cli` prints ping/version.
//! - `profiledesk_cli show <db-path>` prints the stored profile as JSON.
//! - `profiledesk_cli seed <db-path>` writes a demo profile.

use clap::{Parser, Subcommand};
use log::error;
use profiledesk_core::{
    Entry, FieldMap, Profile, ProfileDeskConfig, ProfileScalars, ProfileStore, SqliteProfileStore,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "profiledesk_cli", version, about = "Inspect or seed a local profile store")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stored profile as JSON
    Show {
        /// SQLite database file
        #[arg(value_name = "DB_PATH")]
        path: PathBuf,
    },
    /// Overwrite the stored profile with a demo profile
    Seed {
        /// SQLite database file
        #[arg(value_name = "DB_PATH")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Option<Command>) -> Result<(), String> {
    let config = ProfileDeskConfig::from_env().map_err(|err| err.to_string())?;
    profiledesk_core::init_logging_from_config(&config)?;

    match command {
        None => {
            println!("profiledesk_core ping={}", profiledesk_core::ping());
            println!("profiledesk_core version={}", profiledesk_core::core_version());
        }
        Some(Command::Show { path }) => {
            let store = SqliteProfileStore::open(&path).map_err(|err| err.to_string())?;
            let profile = block_on(async { store.fetch_profile().await })?;
            let json = serde_json::to_string_pretty(&profile).map_err(|err| err.to_string())?;
            println!("{json}");
        }
        Some(Command::Seed { path }) => {
            let store = SqliteProfileStore::open(&path).map_err(|err| err.to_string())?;
            store
                .import_profile(&demo_profile())
                .map_err(|err| err.to_string())?;
            println!("seeded {}", path.display());
        }
    }
    Ok(())
}

fn block_on<T, E: std::fmt::Display>(
    work: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| err.to_string())?;
    runtime.block_on(work).map_err(|err| err.to_string())
}

fn entry(id: i64, pairs: &[(&str, &str)]) -> Entry {
    let fields: FieldMap = pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    Entry::new(id, fields)
}

fn demo_profile() -> Profile {
    Profile {
        id: Some("demo".to_string()),
        scalars: ProfileScalars {
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            profile_picture: String::new(),
        },
        experience: vec![entry(
            1,
            &[
                ("company", "Northwind"),
                ("role", "Backend Engineer"),
                ("duration", "2021 - present"),
            ],
        )],
        education: vec![entry(
            1,
            &[
                ("institution", "State University"),
                ("degree", "BSc Computer Science"),
                ("year", "2020"),
            ],
        )],
        skills: vec![
            entry(1, &[("skillName", "Rust")]),
            entry(2, &[("skillName", "SQL")]),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_runs_smoke_probe() {
        let cli = Cli::try_parse_from(["profiledesk_cli"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_and_seed_take_a_db_path() {
        let cli = Cli::try_parse_from(["profiledesk_cli", "show", "profile.db"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Show { path }) if path == PathBuf::from("profile.db")
        ));

        let cli = Cli::try_parse_from(["profiledesk_cli", "seed", "/tmp/p.db"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Seed { path }) if path == PathBuf::from("/tmp/p.db")
        ));
    }

    #[test]
    fn missing_db_path_is_a_parse_error() {
        let err = Cli::try_parse_from(["profiledesk_cli", "show"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
