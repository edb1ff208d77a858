//! Query processing for the user search service.
//!
//! A request flows through three stages:
//! 1) [`params`] turns raw query-string values into effective parameters,
//!    filling defaults first and rejecting unknown order fields.
//! 2) [`pipeline`] filters, orders and paginates the records of a
//!    [`dataset::UserSource`].
//! 3) The handler encodes the resulting [`SearchResponse`] as JSON.

pub mod dataset;
pub mod order;
pub mod params;
pub mod pipeline;
pub mod user;

pub use self::order::{OrderBy, OrderField, ERROR_BAD_ORDER_FIELD};
pub use self::params::{Defaults, EffectiveParams, ParamsError, RawSearchParams, MAX_LIMIT};
pub use self::user::{ErrorBody, SearchResponse, UserRecord};
