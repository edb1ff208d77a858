//! HTTP client for the search endpoint.
//!
//! Parameters are checked locally before anything is sent, each call is a
//! single attempt bounded by a timeout, and every response is mapped to a
//! [`SearchResponse`] or a typed [`Error`].

mod error;

pub use self::error::Error;

use crate::{
    search::{ErrorBody, OrderBy, SearchResponse, ERROR_BAD_ORDER_FIELD, MAX_LIMIT},
    APP_USER_AGENT,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Default deadline for a single search call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Search parameters as the caller sees them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchRequest {
    pub limit: i64,
    pub offset: i64,
    pub query: String,
    /// `""`, `Id`, `Name` or `About`. Checked by the server.
    pub order_field: String,
    pub order_by: OrderBy,
}

#[derive(Debug, Clone)]
pub struct SearchClient {
    url: Url,
    timeout: Duration,
    http: Client,
}

impl SearchClient {
    /// # Errors
    /// Returns an error if `url` is not a valid URL or the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, Error> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// # Errors
    /// Returns an error if `url` is not a valid URL or the HTTP client cannot be built.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, Error> {
        let url = Url::parse(url)?;
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self { url, timeout, http })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one search against the server.
    ///
    /// A limit above 25 is lowered to 25 before sending. A limit of 0 returns
    /// no users; `next_page` then tells whether any match exists at `offset`.
    ///
    /// # Errors
    /// See [`Error`] for the full mapping of local, transport and server failures.
    pub async fn find_users(&self, request: &SearchRequest) -> Result<SearchResponse, Error> {
        let limit = usize::try_from(request.limit)
            .map_err(|_| Error::NegativeLimit(request.limit))?
            .min(MAX_LIMIT);
        let offset =
            usize::try_from(request.offset).map_err(|_| Error::NegativeOffset(request.offset))?;

        // The server reads `limit=0` as "use the default", so a zero limit
        // asks for one record and only keeps the page flag.
        let url = self.search_url(request, limit.max(1), offset);

        let span = info_span!("search.find_users", http.method = "GET", url = %url);
        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .instrument(span)
            .await
            .map_err(Error::from_transport)?;

        let status = response.status();
        debug!("search server responded with {}", status);

        match status {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(Error::from_transport)?;
                let page: SearchResponse = serde_json::from_slice(&body).map_err(Error::Decode)?;

                if limit == 0 {
                    return Ok(SearchResponse {
                        next_page: !page.users.is_empty() || page.next_page,
                        users: Vec::new(),
                    });
                }

                Ok(page)
            }
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::BAD_REQUEST => {
                let body = response.bytes().await.map_err(Error::from_transport)?;
                let error: ErrorBody = serde_json::from_slice(&body).map_err(Error::Decode)?;

                if error.error == ERROR_BAD_ORDER_FIELD {
                    Err(Error::BadOrderField(request.order_field.clone()))
                } else {
                    Err(Error::UnknownBadRequest(error.error))
                }
            }
            _ => Err(Error::Server {
                status: status.as_u16(),
            }),
        }
    }

    fn search_url(&self, request: &SearchRequest, limit: usize, offset: usize) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string())
            .append_pair("query", &request.query)
            .append_pair("order_field", &request.order_field)
            .append_pair("order_by", request.order_by.as_wire());
        url
    }
}
