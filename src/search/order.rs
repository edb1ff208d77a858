use super::params::ParamsError;
use std::{fmt, str::FromStr};

/// Reserved error message returned with `400` when the order field is unknown.
pub const ERROR_BAD_ORDER_FIELD: &str = "ErrorBadOrderField";

/// Sort direction.
///
/// On the wire it travels as `order_by`: `"-1"` is descending, `"0"` keeps the
/// filtered order and every other value (or none at all) is ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    Descending,
    AsIs,
    #[default]
    Ascending,
}

impl OrderBy {
    /// Decode the wire value. `"-1"` is checked before `"0"`; anything else
    /// falls back to ascending.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "-1" => Self::Descending,
            "0" => Self::AsIs,
            _ => Self::Ascending,
        }
    }

    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Descending => "-1",
            Self::AsIs => "0",
            Self::Ascending => "1",
        }
    }
}

/// Field a search can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Id,
    Name,
    About,
}

impl OrderField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Name => "Name",
            Self::About => "About",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderField {
    type Err = ParamsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Id" => Ok(Self::Id),
            "Name" => Ok(Self::Name),
            "About" => Ok(Self::About),
            other => Err(ParamsError::BadOrderField(other.to_string())),
        }
    }
}
