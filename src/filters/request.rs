use crate::filters::params::{normalize_facet, RawFilterParams};

/// Bounds applied to requested page sizes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PageLimits {
    pub default_page_size: u32,
    pub max_page_size: u32
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 1000
        }
    }
}

/// One listing request with every facet already in canonical form.
///
/// Empty facet lists and `None` values impose no restriction. Sort parameters are carried
/// verbatim; the query executor owns their interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub search: Option<String>,
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub age_range: Option<String>,
    pub date_range: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    /// 1-based.
    pub page: u32,
    pub page_size: u32
}

impl Default for FilterRequest {
    fn default() -> Self {
        Self {
            search: None,
            regions: Vec::new(),
            genders: Vec::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            payment_methods: Vec::new(),
            age_range: None,
            date_range: None,
            sort_by: None,
            sort_order: None,
            page: 1,
            page_size: PageLimits::default().default_page_size
        }
    }
}

impl FilterRequest {
    /// Normalizes raw parameters.
    ///
    /// Blank scalars become `None`. Page numbers and sizes that do not parse fall back to
    /// 1 and the default size, values below 1 are raised to 1, and sizes above the limit
    /// are clamped.
    pub fn from_raw(raw: RawFilterParams, limits: PageLimits) -> Self {
        let page = parse_positive(raw.page.as_deref()).unwrap_or(1);
        let page_size = parse_positive(raw.page_size.as_deref())
            .unwrap_or(limits.default_page_size)
            .min(limits.max_page_size)
            .max(1);

        Self {
            search: non_blank(raw.search),
            regions: normalize_facet(raw.regions.as_ref()),
            genders: normalize_facet(raw.genders.as_ref()),
            categories: normalize_facet(raw.categories.as_ref()),
            tags: normalize_facet(raw.tags.as_ref()),
            payment_methods: normalize_facet(raw.payment_methods.as_ref()),
            age_range: non_blank(raw.age_range),
            date_range: non_blank(raw.date_range),
            sort_by: non_blank(raw.sort_by),
            sort_order: non_blank(raw.sort_order),
            page,
            page_size
        }
    }

    /// Offset of the first record on the requested page. Page and size are raised to at
    /// least 1 first.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size.max(1))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value.and_then(|value| value.trim().parse::<i64>().ok())
        .map(|number| number.clamp(1, i64::from(u32::MAX)) as u32)
}
