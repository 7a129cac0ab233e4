use std::collections::HashMap;

/// A multi-valued facet parameter as it arrived: either repeated keys or a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetInput {
    List(Vec<String>),
    Scalar(String)
}

/// Normalizes a facet parameter into its canonical list of selected values.
///
/// A scalar is split on `,`; every token is trimmed and empty tokens are dropped. List
/// elements are trimmed and empty elements dropped but are never split, so a value that
/// itself contains a comma survives when sent as repeated keys. Absent input yields an
/// empty list, which imposes no restriction.
pub fn normalize_facet(input: Option<&FacetInput>) -> Vec<String> {
    match input {
        None => Vec::new(),
        Some(FacetInput::Scalar(value)) => value.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
        Some(FacetInput::List(values)) => values.iter()
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Query parameters for a sales listing, untyped and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilterParams {
    pub search: Option<String>,
    pub regions: Option<FacetInput>,
    pub genders: Option<FacetInput>,
    pub categories: Option<FacetInput>,
    pub tags: Option<FacetInput>,
    pub payment_methods: Option<FacetInput>,
    pub age_range: Option<String>,
    pub date_range: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>
}

impl RawFilterParams {
    /// Collects decoded query-string pairs.
    ///
    /// Facet keys are accepted with or without a trailing `[]`. Repeating a facet key builds
    /// a list; a scalar key that repeats keeps its last value. Unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = RawFilterParams::default();
        let mut facets: HashMap<&'static str, Vec<String>> = HashMap::new();

        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.into();

            match key.strip_suffix("[]").unwrap_or(key) {
                "search" => params.search = Some(value),
                "ageRange" => params.age_range = Some(value),
                "dateRange" => params.date_range = Some(value),
                "sortBy" => params.sort_by = Some(value),
                "sortOrder" => params.sort_order = Some(value),
                "page" => params.page = Some(value),
                "pageSize" => params.page_size = Some(value),
                "regions" => facets.entry("regions").or_default().push(value),
                "genders" => facets.entry("genders").or_default().push(value),
                "categories" => facets.entry("categories").or_default().push(value),
                "tags" => facets.entry("tags").or_default().push(value),
                "paymentMethods" => facets.entry("paymentMethods").or_default().push(value),
                _ => {}
            }
        }

        let mut take = |name: &str| facets.remove(name).map(|mut values| {
            if values.len() == 1 {
                FacetInput::Scalar(values.remove(0))
            } else {
                FacetInput::List(values)
            }
        });

        params.regions = take("regions");
        params.genders = take("genders");
        params.categories = take("categories");
        params.tags = take("tags");
        params.payment_methods = take("paymentMethods");

        params
    }
}
