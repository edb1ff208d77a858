use crate::search::params::DEFAULT_LIMIT;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

pub const NAME: &str = "server";
pub const ARG_PORT: &str = "port";
pub const ARG_DATASET: &str = "dataset";
pub const ARG_RELOAD: &str = "reload";
pub const ARG_DEFAULT_LIMIT: &str = "default-limit";

#[derive(Debug, Clone)]
pub struct Options {
    pub port: u16,
    pub dataset: PathBuf,
    pub reload: bool,
    pub default_limit: usize,
}

impl Options {
    /// Parse server arguments from the `server` subcommand matches.
    ///
    /// # Errors
    /// Returns an error if required arguments are missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let dataset = matches
            .get_one::<String>(ARG_DATASET)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_DATASET}"))?;

        Ok(Self {
            port: matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080),
            dataset,
            reload: matches.get_flag(ARG_RELOAD),
            default_limit: matches
                .get_one::<u64>(ARG_DEFAULT_LIMIT)
                .and_then(|&limit| usize::try_from(limit).ok())
                .unwrap_or(DEFAULT_LIMIT),
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Serve user searches over HTTP")
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("USERSEARCH_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_DATASET)
                .short('d')
                .long(ARG_DATASET)
                .help("Path to the user dataset, JSON or .xml")
                .env("USERSEARCH_DATASET")
                .required(true),
        )
        .arg(
            Arg::new(ARG_RELOAD)
                .long(ARG_RELOAD)
                .help("Re-read the dataset on every request instead of once at startup")
                .env("USERSEARCH_RELOAD")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_DEFAULT_LIMIT)
                .long(ARG_DEFAULT_LIMIT)
                .help("Page size used when a request has no valid limit")
                .default_value("5")
                .env("USERSEARCH_DEFAULT_LIMIT")
                .value_parser(clap::value_parser!(u64).range(1..=25)),
        )
}
