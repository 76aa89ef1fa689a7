//! Filtering, sorting and pagination types for group listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CohortError, CohortResult};

/// Default page size when the client does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;

const MAX_OFFSET: u64 = i64::MAX as u64;

/// Exact-match filter on group attributes. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub private: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Description,
    Private,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Column name in the persisted record.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Private => "private",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = CohortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "description" => Ok(Self::Description),
            "private" => Ok(Self::Private),
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            other => Err(CohortError::validation(format!(
                "cannot sort by unknown field '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Parse a `sortBy` expression such as `name:desc,createdAt:asc`.
///
/// The direction defaults to ascending when omitted.
pub fn parse_sort_by(expr: &str) -> CohortResult<Vec<SortCriterion>> {
    expr.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (field, direction) = match part.split_once(':') {
                Some((field, dir)) => (field, dir),
                None => (part, "asc"),
            };
            let direction = match direction.trim() {
                "asc" => SortDirection::Asc,
                "desc" => SortDirection::Desc,
                other => {
                    return Err(CohortError::validation(format!(
                        "invalid sort direction '{other}'"
                    )));
                }
            };
            Ok(SortCriterion {
                field: field.trim().parse()?,
                direction,
            })
        })
        .collect()
}

/// Raw listing options as received from a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    pub sort_by: Option<String>,
    pub limit: Option<u64>,
    pub page: Option<u64>,
}

impl ListOptions {
    /// Resolve defaults and bounds. Zero values fall back to the
    /// defaults; limits above `max_limit` are clamped.
    pub fn resolve(&self, default_limit: u64, max_limit: u64) -> CohortResult<Paging> {
        let sort_by = match self.sort_by.as_deref() {
            Some(expr) => parse_sort_by(expr)?,
            None => Vec::new(),
        };
        let limit = match self.limit {
            Some(limit) if limit > 0 => limit.min(max_limit.max(1)),
            _ => default_limit.max(1),
        };
        let page = self.page.filter(|p| *p > 0).unwrap_or(1);
        Ok(Paging {
            sort_by,
            limit,
            page,
        })
    }
}

/// Validated paging options handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paging {
    pub sort_by: Vec<SortCriterion>,
    /// Always at least 1.
    pub limit: u64,
    /// 1-based, always at least 1.
    pub page: u64,
}

impl Paging {
    /// Rows to skip, capped at `i64::MAX` so the store never sees a
    /// negative `START`.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .checked_mul(self.limit)
            .map_or(MAX_OFFSET, |offset| offset.min(MAX_OFFSET))
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            sort_by: Vec::new(),
            limit: DEFAULT_PAGE_LIMIT,
            page: 1,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_results: u64,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, paging: &Paging, total_results: u64) -> Self {
        Self {
            results,
            page: paging.page,
            limit: paging.limit,
            total_pages: total_results.div_ceil(paging.limit),
            total_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_multiple_criteria() {
        let criteria = parse_sort_by("name:desc,createdAt:asc").unwrap();
        assert_eq!(
            criteria,
            vec![
                SortCriterion {
                    field: SortField::Name,
                    direction: SortDirection::Desc,
                },
                SortCriterion {
                    field: SortField::CreatedAt,
                    direction: SortDirection::Asc,
                },
            ]
        );
    }

    #[test]
    fn direction_defaults_to_ascending() {
        let criteria = parse_sort_by("description").unwrap();
        assert_eq!(criteria[0].direction, SortDirection::Asc);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert!(matches!(
            parse_sort_by("admin:asc"),
            Err(CohortError::Validation { .. })
        ));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        assert!(parse_sort_by("name:sideways").is_err());
    }

    #[test]
    fn resolve_applies_defaults() {
        let paging = ListOptions::default().resolve(10, 100).unwrap();
        assert_eq!(paging.limit, 10);
        assert_eq!(paging.page, 1);
        assert!(paging.sort_by.is_empty());
    }

    #[test]
    fn resolve_treats_zero_as_default_and_clamps() {
        let opts = ListOptions {
            sort_by: None,
            limit: Some(0),
            page: Some(0),
        };
        let paging = opts.resolve(10, 100).unwrap();
        assert_eq!(paging.limit, 10);
        assert_eq!(paging.page, 1);

        let opts = ListOptions {
            sort_by: None,
            limit: Some(5_000),
            page: Some(3),
        };
        let paging = opts.resolve(10, 100).unwrap();
        assert_eq!(paging.limit, 100);
        assert_eq!(paging.offset(), 200);
    }

    #[test]
    fn huge_page_offset_is_capped() {
        let paging = Paging {
            page: u64::MAX,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(paging.offset(), i64::MAX as u64);

        let paging = Paging {
            page: 1 << 62,
            limit: 1,
            ..Default::default()
        };
        assert_eq!(paging.offset(), (1 << 62) - 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let paging = Paging {
            limit: 3,
            ..Default::default()
        };
        let page: Page<u8> = Page::new(vec![1, 2, 3], &paging, 7);
        assert_eq!(page.total_pages, 3);
        let empty: Page<u8> = Page::new(vec![], &paging, 0);
        assert_eq!(empty.total_pages, 0);
    }
}
