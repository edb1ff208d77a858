//! # Usersearch
//!
//! A small user-search service and its client.
//!
//! The server loads a fixed user dataset, keeps the records whose `Name` or
//! `About` contains the query, orders them by `Id`, `Name` or `About` and
//! returns one page as JSON. The client validates parameters locally, calls
//! the server with a bounded timeout and maps every outcome to a typed result.
//!
//! ## Wire contract
//!
//! - `GET /?query=&order_field=&order_by=&limit=&offset=` (also `/v1/users`).
//! - `200`: `{"users": [{"Id", "Name", "Age", "About", "Gender"}], "next_page": bool}`.
//!   The envelope keys are snake_case and the record keys PascalCase, as the
//!   wire format has always been.
//! - Repeated query parameters keep their first value.
//! - Errors: non-200 status with `{"Error": "<message>"}`. An unknown order
//!   field answers `400` with the reserved message `ErrorBadOrderField`.
//! - Page size is capped at 25.

pub mod api;
pub mod cli;
pub mod client;
pub mod search;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
