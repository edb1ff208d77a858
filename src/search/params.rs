//! Request parameter handling.
//!
//! Raw query-string values go through two explicit steps:
//! 1) [`RawSearchParams::fill_defaults`] parses numbers and substitutes
//!    [`Defaults`] for anything missing or out of range.
//! 2) [`FilledParams::validate`] resolves the order field, which is the only
//!    value that can reject a request.

use super::order::{OrderBy, OrderField};
use serde::Deserialize;
use thiserror::Error;
use utoipa::IntoParams;

/// Upper bound applied to the page size during pagination.
pub const MAX_LIMIT: usize = 25;
pub const DEFAULT_LIMIT: usize = 5;
pub const DEFAULT_OFFSET: usize = 0;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error("unknown order field: {0:?}")]
    BadOrderField(String),
}

/// Values used when a request omits a parameter or sends an unusable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    pub limit: usize,
    pub offset: usize,
    pub order_field: OrderField,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            order_field: OrderField::Name,
        }
    }
}

/// Query string as received. Every value is optional and untyped.
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawSearchParams {
    /// Substring matched against `Name` and `About`.
    pub query: Option<String>,
    /// One of `Id`, `Name`, `About`; empty means `Name`.
    pub order_field: Option<String>,
    /// `-1` descending, `0` as-is, anything else ascending.
    pub order_by: Option<String>,
    /// Page size, capped at 25.
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Parameters after default-filling, before the order field is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledParams {
    pub query: String,
    pub order_field: String,
    pub order_by: OrderBy,
    pub limit: usize,
    pub offset: usize,
}

/// Parameters the pipeline runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveParams {
    pub query: String,
    pub order_field: OrderField,
    pub order_by: OrderBy,
    pub limit: usize,
    pub offset: usize,
}

impl RawSearchParams {
    /// Collect query-string pairs. When a key repeats, its first value wins;
    /// unknown keys are ignored.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "query" => &mut params.query,
                "order_field" => &mut params.order_field,
                "order_by" => &mut params.order_by,
                "limit" => &mut params.limit,
                "offset" => &mut params.offset,
                _ => continue,
            };

            if slot.is_none() {
                *slot = Some(value.into());
            }
        }

        params
    }

    #[must_use]
    pub fn fill_defaults(self, defaults: &Defaults) -> FilledParams {
        let order_field = match self.order_field {
            Some(field) if !field.is_empty() => field,
            _ => defaults.order_field.as_str().to_string(),
        };

        FilledParams {
            query: self.query.unwrap_or_default(),
            order_field,
            order_by: self
                .order_by
                .as_deref()
                .map_or(OrderBy::Ascending, OrderBy::from_wire),
            limit: parse_limit(self.limit.as_deref(), defaults.limit),
            offset: parse_offset(self.offset.as_deref(), defaults.offset),
        }
    }
}

impl FilledParams {
    /// # Errors
    /// Returns [`ParamsError::BadOrderField`] if the order field is not one of
    /// `Id`, `Name` or `About`.
    pub fn validate(self) -> Result<EffectiveParams, ParamsError> {
        Ok(EffectiveParams {
            order_field: self.order_field.parse()?,
            query: self.query,
            order_by: self.order_by,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

impl EffectiveParams {
    /// Fill defaults, then validate.
    ///
    /// # Errors
    /// Returns [`ParamsError::BadOrderField`] for an unknown order field.
    pub fn from_raw(raw: RawSearchParams, defaults: &Defaults) -> Result<Self, ParamsError> {
        raw.fill_defaults(defaults).validate()
    }
}

/// Positive integers are kept, anything else becomes `default`.
fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.parse::<i64>().ok())
        .filter(|&value| value > 0)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(default)
}

/// Non-negative integers are kept, anything else becomes `default`.
fn parse_offset(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|value| value.parse::<i64>().ok())
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(default)
}
