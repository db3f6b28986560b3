//! List view state carried in the URL query string.
//!
//! The codec is purely syntactic: it parses `page`, `per_page`, `sort` and the
//! free-form filter keys but never checks whether a sort field or filter key
//! exists. The list gateway decides what to do with unknown values.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::listing::SortDirection;

pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per_page";
pub const SORT_PARAM: &str = "sort";

/// Sort request in the `<field>.<asc|desc>` form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortParam {
    pub field: String,
    pub direction: SortDirection,
}

impl SortParam {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl Display for SortParam {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.field, self.direction)
    }
}

impl FromStr for SortParam {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = s.rsplit_once('.').ok_or(())?;
        if field.is_empty() {
            return Err(());
        }
        Ok(Self::new(field, direction.parse()?))
    }
}

/// Decoded list view parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ListState {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub sort: Option<SortParam>,
    /// Every other query key, in key order.
    pub filters: BTreeMap<String, String>,
}

impl ListState {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Unparseable `page`, `per_page` or `sort` values are dropped. When a key
    /// repeats, the last occurrence wins.
    pub fn decode(query: &str) -> Self {
        let mut state = ListState::default();
        for (key, value) in parse_pairs(query) {
            match key.as_str() {
                PAGE_PARAM => state.page = value.trim().parse().ok(),
                PER_PAGE_PARAM => state.per_page = value.trim().parse().ok(),
                SORT_PARAM => state.sort = value.parse().ok(),
                _ => {
                    state.filters.insert(key, value);
                }
            }
        }
        state
    }

    /// Serializes the state as `page`, `per_page`, `sort`, then filters.
    pub fn encode(&self) -> String {
        encode_pairs(&self.to_pairs())
    }

    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        if let Some(page) = self.page {
            pairs.push((PAGE_PARAM.to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push((PER_PAGE_PARAM.to_string(), per_page.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push((SORT_PARAM.to_string(), sort.to_string()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        pairs
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }
}

/// Merges `updates` into `query`.
///
/// A `None` value removes the key; a `Some` value replaces every existing
/// occurrence in place (keeping the first position) or is appended when the
/// key is new.
pub fn merge_query(query: &str, updates: &[(&str, Option<String>)]) -> String {
    let mut pairs = parse_pairs(query);

    for (key, value) in updates {
        match value {
            None => pairs.retain(|(existing, _)| existing != key),
            Some(value) => {
                let mut replaced = false;
                pairs.retain_mut(|(existing, current)| {
                    if existing != key {
                        return true;
                    }
                    if replaced {
                        return false;
                    }
                    *current = value.clone();
                    replaced = true;
                    true
                });
                if !replaced {
                    pairs.push((key.to_string(), value.clone()));
                }
            }
        }
    }

    encode_pairs(&pairs)
}

fn parse_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    serde_html_form::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed query string: {err}");
        Vec::new()
    })
}

fn encode_pairs(pairs: &[(String, String)]) -> String {
    serde_html_form::to_string(pairs).unwrap_or_else(|err| {
        log::warn!("Failed to encode query string: {err}");
        String::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(
        page: Option<usize>,
        per_page: Option<usize>,
        sort: Option<(&str, SortDirection)>,
        filters: &[(&str, &str)],
    ) -> ListState {
        ListState {
            page,
            per_page,
            sort: sort.map(|(field, dir)| SortParam::new(field, dir)),
            filters: filters
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn decode_reads_known_and_filter_keys() {
        let decoded = ListState::decode("page=2&per_page=20&sort=name.asc&title=Senior");
        assert_eq!(
            decoded,
            state(
                Some(2),
                Some(20),
                Some(("name", SortDirection::Asc)),
                &[("title", "Senior")]
            )
        );
    }

    #[test]
    fn decode_drops_unparseable_values_without_judging_fields() {
        let decoded = ListState::decode("?page=abc&per_page=-1&sort=name.sideways");
        assert_eq!(decoded, ListState::default());

        let unknown_field = ListState::decode("sort=salary.desc&page=0");
        assert_eq!(
            unknown_field.sort,
            Some(SortParam::new("salary", SortDirection::Desc))
        );
        assert_eq!(unknown_field.page, Some(0));
    }

    #[test]
    fn sort_splits_on_last_dot() {
        assert_eq!(
            "client.name.desc".parse(),
            Ok(SortParam::new("client.name", SortDirection::Desc))
        );
        assert_eq!(".asc".parse::<SortParam>(), Err(()));
        assert_eq!("name".parse::<SortParam>(), Err(()));
    }

    #[test]
    fn repeated_keys_last_wins() {
        let decoded = ListState::decode("name=A&name=B&page=1&page=3");
        assert_eq!(decoded.filter("name"), Some("B"));
        assert_eq!(decoded.page, Some(3));
    }

    #[test]
    fn round_trip_preserves_state() {
        let samples = vec![
            ListState::default(),
            state(Some(1), None, None, &[]),
            state(
                Some(4),
                Some(50),
                Some(("created_at", SortDirection::Desc)),
                &[("name", "Ann & Bob"), ("title", "R&D lead=1"), ("email", "")],
            ),
            state(
                None,
                Some(10),
                Some(("name", SortDirection::Asc)),
                &[("name", "Żaneta ü/?#")],
            ),
        ];

        for sample in samples {
            assert_eq!(ListState::decode(&sample.encode()), sample);
        }
    }

    #[test]
    fn merge_replaces_appends_and_deletes() {
        let query = "name=Ann&page=3&sort=name.asc";

        assert_eq!(
            merge_query(query, &[("page", Some("4".to_string()))]),
            "name=Ann&page=4&sort=name.asc"
        );
        assert_eq!(
            merge_query(query, &[("per_page", Some("20".to_string()))]),
            "name=Ann&page=3&sort=name.asc&per_page=20"
        );
        assert_eq!(
            merge_query(query, &[("sort", None), ("page", None)]),
            "name=Ann"
        );
    }

    #[test]
    fn merge_collapses_duplicate_keys() {
        assert_eq!(
            merge_query("a=1&b=2&a=3", &[("a", Some("9".to_string()))]),
            "a=9&b=2"
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let updates = [
            ("sort", Some("name.desc".to_string())),
            ("page", None),
        ];
        let once = merge_query("page=2&name=A", &updates);
        let twice = merge_query(&once, &updates);
        assert_eq!(once, twice);
    }
}
