use crate::client::{SearchClient, SearchRequest};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub url: String,
    pub request: SearchRequest,
    pub timeout: Duration,
}

/// Run one search against a server and print the page as JSON.
/// # Errors
/// Returns an error if the request fails or the server answers with an error.
pub async fn execute(args: Args) -> Result<()> {
    let client = SearchClient::with_timeout(&args.url, args.timeout)
        .with_context(|| format!("Invalid search URL: {}", args.url))?;

    debug!(request = ?args.request, "searching");

    let response = client.find_users(&args.request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
