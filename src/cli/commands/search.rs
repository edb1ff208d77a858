use crate::{
    client::{SearchRequest, DEFAULT_TIMEOUT},
    search::OrderBy,
};
use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const NAME: &str = "search";
pub const ARG_URL: &str = "url";
pub const ARG_QUERY: &str = "query";
pub const ARG_ORDER_FIELD: &str = "order-field";
pub const ARG_ORDER_BY: &str = "order-by";
pub const ARG_LIMIT: &str = "limit";
pub const ARG_OFFSET: &str = "offset";
pub const ARG_TIMEOUT: &str = "timeout";

#[derive(Debug, Clone)]
pub struct Options {
    pub url: String,
    pub request: SearchRequest,
    pub timeout: Duration,
}

impl Options {
    /// Parse client arguments from the `search` subcommand matches.
    ///
    /// # Errors
    /// Returns an error if the server URL is missing.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let url = matches
            .get_one::<String>(ARG_URL)
            .cloned()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_URL}"))?;

        let read_string = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

        Ok(Self {
            url,
            request: SearchRequest {
                limit: matches.get_one::<i64>(ARG_LIMIT).copied().unwrap_or(5),
                offset: matches.get_one::<i64>(ARG_OFFSET).copied().unwrap_or(0),
                query: read_string(ARG_QUERY),
                order_field: read_string(ARG_ORDER_FIELD),
                order_by: OrderBy::from_wire(&read_string(ARG_ORDER_BY)),
            },
            timeout: matches
                .get_one::<u64>(ARG_TIMEOUT)
                .copied()
                .map_or(DEFAULT_TIMEOUT, Duration::from_millis),
        })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new(NAME)
        .about("Query a running search server")
        .arg(
            Arg::new(ARG_URL)
                .short('u')
                .long(ARG_URL)
                .help("Search endpoint, example: http://localhost:8080/v1/users")
                .env("USERSEARCH_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_QUERY)
                .short('q')
                .long(ARG_QUERY)
                .help("Substring to look for in Name or About")
                .default_value(""),
        )
        .arg(
            Arg::new(ARG_ORDER_FIELD)
                .long(ARG_ORDER_FIELD)
                .help("Id, Name or About (empty: server default)")
                .default_value(""),
        )
        .arg(
            Arg::new(ARG_ORDER_BY)
                .long(ARG_ORDER_BY)
                .help("-1 descending, 0 as-is, 1 ascending")
                .default_value("1")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new(ARG_LIMIT)
                .short('l')
                .long(ARG_LIMIT)
                .help("Page size, at most 25")
                .default_value("5")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_OFFSET)
                .short('o')
                .long(ARG_OFFSET)
                .help("Number of matching users to skip")
                .default_value("0")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long(ARG_TIMEOUT)
                .help("Request timeout in milliseconds")
                .default_value("1000")
                .env("USERSEARCH_TIMEOUT")
                .value_parser(clap::value_parser!(u64)),
        )
}
