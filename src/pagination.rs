//! Page/limit resolution for listing endpoints.
//!
//! Pagination input is never rejected: anything that is not a positive
//! integer falls back to the configured defaults.

/// Configured page-size bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitBounds {
    pub max_limit: usize,
    pub default_limit: usize,
}

/// Validated page selection for a single request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    /// Number of records preceding this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
}

/// Resolves raw `page`/`limit` query values against `bounds`.
pub fn resolve_page_request(
    raw_page: Option<&str>,
    raw_limit: Option<&str>,
    bounds: LimitBounds,
) -> PageRequest {
    let page = parse_positive(raw_page).unwrap_or(1);
    let limit = match parse_positive(raw_limit) {
        Some(limit) => limit.min(bounds.max_limit),
        None => bounds.default_limit,
    };

    PageRequest { page, limit }
}

/// `ceil(total / limit)`, zero for an empty result.
pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const BOUNDS: LimitBounds = LimitBounds {
        max_limit: 50,
        default_limit: 20,
    };

    #[test]
    fn uses_values_within_bounds() {
        let request = resolve_page_request(Some("3"), Some("20"), BOUNDS);
        assert_eq!(request, PageRequest { page: 3, limit: 20 });
        assert_eq!(request.offset(), 40);
    }

    #[test]
    fn clamps_limit_to_max() {
        let request = resolve_page_request(None, Some("500"), BOUNDS);
        assert_eq!(request.limit, 50);
    }

    #[test]
    fn falls_back_to_defaults() {
        for raw in [None, Some(""), Some("abc"), Some("0"), Some("-4"), Some("2.5")] {
            let request = resolve_page_request(raw, raw, BOUNDS);
            assert_eq!(request, PageRequest { page: 1, limit: 20 }, "input {raw:?}");
        }
    }

    #[test]
    fn limit_of_one_is_kept() {
        assert_eq!(resolve_page_request(None, Some("1"), BOUNDS).limit, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(41, 20), 3);
    }

    #[test]
    fn huge_page_offset_saturates() {
        let request = PageRequest {
            page: usize::MAX,
            limit: 50,
        };
        assert_eq!(request.offset(), usize::MAX);
    }

    proptest! {
        #[test]
        fn limit_above_max_is_clamped(limit in 51usize..1_000_000) {
            let request = resolve_page_request(None, Some(&limit.to_string()), BOUNDS);
            prop_assert_eq!(request.limit, BOUNDS.max_limit);
        }

        #[test]
        fn non_numeric_values_use_defaults(raw in "[^0-9]*") {
            let request = resolve_page_request(Some(&raw), Some(&raw), BOUNDS);
            prop_assert_eq!(request.page, 1);
            prop_assert_eq!(request.limit, BOUNDS.default_limit);
        }

        #[test]
        fn resolved_limit_stays_in_range(raw in proptest::option::of(".*")) {
            let request = resolve_page_request(None, raw.as_deref(), BOUNDS);
            prop_assert!(request.limit >= 1 && request.limit <= BOUNDS.max_limit);
        }

        #[test]
        fn pages_is_ceiling_of_total(total in 0usize..100_000, limit in 1usize..500) {
            let pages = total_pages(total, limit);
            prop_assert!(pages * limit >= total);
            prop_assert!(pages == 0 || (pages - 1) * limit < total);
        }
    }
}
