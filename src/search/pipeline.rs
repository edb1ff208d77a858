//! Filter, order and paginate a slice of users.

use super::{
    order::{OrderBy, OrderField},
    params::{EffectiveParams, MAX_LIMIT},
    user::{SearchResponse, UserRecord},
};
use std::cmp::Ordering;

/// Run the whole pipeline over `records`.
///
/// `next_page` is derived from the un-paginated match count, so it stays
/// correct even when the page size was capped.
#[must_use]
pub fn process(records: &[UserRecord], params: &EffectiveParams) -> SearchResponse {
    let mut matched = filter(records, &params.query);
    order(&mut matched, params.order_field, params.order_by);

    let limit = params.limit.min(MAX_LIMIT);
    let users = paginate(&matched, limit, params.offset)
        .iter()
        .map(|user| (*user).clone())
        .collect();

    SearchResponse {
        users,
        next_page: params.offset.saturating_add(limit) < matched.len(),
    }
}

/// Keep records whose `Name` or `About` contains `query`. Matching is
/// case-sensitive; an empty query keeps everything.
#[must_use]
pub fn filter<'a>(records: &'a [UserRecord], query: &str) -> Vec<&'a UserRecord> {
    records
        .iter()
        .filter(|user| query.is_empty() || user.name.contains(query) || user.about.contains(query))
        .collect()
}

/// Stable sort by `field`. Equal keys keep their relative order in both
/// directions; [`OrderBy::AsIs`] leaves the slice untouched.
pub fn order(users: &mut [&UserRecord], field: OrderField, direction: OrderBy) {
    let compare = |a: &&UserRecord, b: &&UserRecord| -> Ordering {
        match field {
            OrderField::Id => a.id.cmp(&b.id),
            OrderField::Name => a.name.cmp(&b.name),
            OrderField::About => a.about.cmp(&b.about),
        }
    };

    match direction {
        OrderBy::AsIs => {}
        OrderBy::Ascending => users.sort_by(compare),
        OrderBy::Descending => users.sort_by(|a, b| compare(b, a)),
    }
}

/// Contiguous window of at most `limit` items starting at `offset`.
#[must_use]
pub fn paginate<T>(items: &[T], limit: usize, offset: usize) -> &[T] {
    let Some(rest) = items.get(offset..) else {
        return &[];
    };

    &rest[..limit.min(rest.len())]
}
