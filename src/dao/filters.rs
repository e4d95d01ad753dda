//! List-query paging, sorting and result metadata.

use crate::validation::{self, Validator};

/// Hard ceiling on the requested page number.
const MAX_PAGE: i64 = 10_000_000;
/// Hard ceiling on the page size a client may request.
const MAX_PAGE_SIZE: i64 = 100;

/// Client-supplied paging and sorting for a list query.
///
/// Constructed once per request. `sort_safelist` is the fixed set of sort
/// expressions the current endpoint permits; nothing outside it ever reaches
/// query construction.
#[derive(Debug, Clone)]
pub struct Filters {
    /// Requested page number, 1-based.
    pub page: i64,
    /// Requested rows per page.
    pub page_size: i64,
    /// Sort expression, optionally prefixed with `-` for descending.
    pub sort: String,
    /// Sort expressions permitted for this endpoint.
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// The column to order by, stripped of its direction prefix.
    ///
    /// Panics on a sort expression outside the safelist: reaching this with
    /// an unvalidated value would interpolate client input into the query, so
    /// it is a hard stop rather than a fallback. Unreachable in practice
    /// because [`validate_filters`] rejects the request first.
    pub fn sort_column(&self) -> &str {
        for entry in self.sort_safelist {
            if self.sort == *entry {
                return self.sort.trim_start_matches('-');
            }
        }
        panic!("unsafe sort parameter: {}", self.sort);
    }

    /// `ASC` or `DESC` depending on the `-` prefix.
    pub fn sort_direction(&self) -> &'static str {
        if self.sort.starts_with('-') {
            "DESC"
        } else {
            "ASC"
        }
    }

    /// Row limit for the current page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// Row offset for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Validate paging bounds and safelist membership.
pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(
        filters.page <= MAX_PAGE,
        "page",
        "must be a maximum of 10 million",
    );
    v.check(
        filters.page_size > 0,
        "page_size",
        "must be greater than zero",
    );
    v.check(
        filters.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        validation::permitted(&filters.sort, filters.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

/// Read-only summary of a list result page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Page echoed from the request.
    pub current_page: i64,
    /// Page size echoed from the request.
    pub page_size: i64,
    /// Number of the last page holding any matching record.
    pub last_page: i64,
    /// Count of all matching records, ignoring pagination.
    pub total_records: i64,
}

/// Derive result metadata from the total row count and the request paging.
///
/// An empty match set yields the all-zero metadata rather than page numbers
/// pointing at nothing.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 {
        return Metadata::default();
    }
    Metadata {
        current_page: page,
        page_size,
        last_page: (total_records as u64).div_ceil(page_size as u64) as i64,
        total_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAFELIST: &[&str] = &["id", "title", "score", "-id", "-title", "-score"];

    fn filters(page: i64, page_size: i64, sort: &str) -> Filters {
        Filters {
            page,
            page_size,
            sort: sort.to_owned(),
            sort_safelist: SAFELIST,
        }
    }

    #[test]
    fn sort_column_strips_direction_prefix() {
        assert_eq!(filters(1, 20, "title").sort_column(), "title");
        assert_eq!(filters(1, 20, "-score").sort_column(), "score");
    }

    #[test]
    fn sort_direction_follows_prefix() {
        assert_eq!(filters(1, 20, "id").sort_direction(), "ASC");
        assert_eq!(filters(1, 20, "-id").sort_direction(), "DESC");
    }

    #[test]
    #[should_panic(expected = "unsafe sort parameter")]
    fn sort_column_panics_outside_safelist() {
        filters(1, 20, "created_at; DROP TABLE games").sort_column();
    }

    #[test]
    fn limit_and_offset_arithmetic() {
        let f = filters(3, 20, "id");
        assert_eq!(f.limit(), 20);
        assert_eq!(f.offset(), 40);
        assert_eq!(filters(1, 20, "id").offset(), 0);
    }

    #[test]
    fn valid_filters_pass() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(1, 20, "id"));
        assert!(v.valid());
    }

    #[test]
    fn bounds_are_enforced() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(0, 101, "id"));
        let errors = v.into_errors();
        assert_eq!(
            errors.get("page").map(String::as_str),
            Some("must be greater than zero")
        );
        assert_eq!(
            errors.get("page_size").map(String::as_str),
            Some("must be a maximum of 100")
        );
    }

    #[test]
    fn oversized_page_is_rejected() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(10_000_001, 20, "id"));
        assert!(v.into_errors().contains_key("page"));
    }

    #[test]
    fn unsafelisted_sort_is_rejected() {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters(1, 20, "version"));
        assert_eq!(
            v.into_errors().get("sort").map(String::as_str),
            Some("invalid sort value")
        );
    }

    #[test]
    fn metadata_rounds_the_last_page_up() {
        let metadata = calculate_metadata(45, 1, 20);
        assert_eq!(metadata.last_page, 3);
        assert_eq!(metadata.total_records, 45);
        assert_eq!(metadata.current_page, 1);
        assert_eq!(metadata.page_size, 20);
    }

    #[test]
    fn metadata_for_exact_multiple() {
        assert_eq!(calculate_metadata(40, 2, 20).last_page, 2);
    }

    #[test]
    fn empty_result_yields_zero_metadata() {
        assert_eq!(calculate_metadata(0, 1, 20), Metadata::default());
    }
}
