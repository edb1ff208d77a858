//! Maps validated CLI matches to the action to run.

use crate::cli::{
    actions::{search, server, Action},
    commands,
};
use anyhow::{anyhow, Result};

/// # Errors
/// Returns an error if the subcommand is unknown or its arguments are inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some((commands::server::NAME, sub_m)) => {
            let options = commands::server::Options::parse(sub_m)?;

            Ok(Action::Server(server::Args {
                port: options.port,
                dataset: options.dataset,
                reload: options.reload,
                default_limit: options.default_limit,
            }))
        }
        Some((commands::search::NAME, sub_m)) => {
            let options = commands::search::Options::parse(sub_m)?;

            Ok(Action::Search(search::Args {
                url: options.url,
                request: options.request,
                timeout: options.timeout,
            }))
        }
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
