use crate::{
    api,
    search::{
        dataset::{FileSource, MemorySource, UserSource},
        Defaults,
    },
};
use anyhow::{Context, Result};
use std::{fmt::Write, path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dataset: PathBuf,
    pub reload: bool,
    pub default_limit: usize,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the dataset cannot be loaded or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let source: Arc<dyn UserSource> = if args.reload {
        Arc::new(FileSource::new(args.dataset))
    } else {
        let source = MemorySource::from_path(&args.dataset).with_context(|| {
            format!("Failed to load dataset: {}", args.dataset.display())
        })?;
        Arc::new(source)
    };

    let defaults = Defaults {
        limit: args.default_limit,
        ..Defaults::default()
    };

    api::new(args.port, source, defaults).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("dataset", args.dataset.display().to_string()),
        (
            "dataset_mode",
            if args.reload { "reload" } else { "memory" }.to_string(),
        ),
        ("default_limit", args.default_limit.to_string()),
    ];

    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!(
        "{} {}\n\nStartup configuration:",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    for (key, value) in entries {
        let _ = write!(message, "\n  {key:<max_key_len$} : {value}");
    }

    info!("{message}");
}
