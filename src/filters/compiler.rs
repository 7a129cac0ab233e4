use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::filters::ranges::{AgeBucket, DateBounds};
use crate::filters::request::FilterRequest;
use crate::models::{FacetField, SaleRecord, SalesError};

/// A positional SQL parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Text(String),
    Integer(i64)
}

/// Condition fragments joined with `AND`, plus the values bound to their `?` placeholders
/// in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlFilter {
    pub conditions: Vec<String>,
    pub params: Vec<SqlParam>
}

impl SqlFilter {
    /// `WHERE a AND b ...`, or an empty string when nothing is restricted.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        format!("WHERE {}", self.conditions.join(" AND "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Clause {
    /// Case folding is ASCII-only, matching SQLite's `LOWER`; non-ASCII letters must match
    /// exactly (`"élodie"` does not find `"ÉLODIE"`). Needle is already folded.
    Search(String),
    OneOf(FacetField, Vec<String>),
    Tags(Vec<String>),
    Age(AgeBucket),
    Date(DateBounds)
}

impl Clause {
    fn matches(&self, record: &SaleRecord) -> bool {
        match self {
            Clause::Search(needle) => {
                record.customer_name.to_ascii_lowercase().contains(needle.as_str())
                    || record.phone_number.to_ascii_lowercase().contains(needle.as_str())
            }
            Clause::OneOf(field, values) => {
                let value = record.facet_value(*field);
                values.iter().any(|selected| selected == value)
            }
            Clause::Tags(tags) => tags.iter().any(|tag| tag_matches(&record.tags, tag)),
            Clause::Age(bucket) => bucket.contains(record.age),
            Clause::Date(bounds) => bounds.contains(record.date)
        }
    }

    fn render(&self, sql: &mut SqlFilter) {
        match self {
            Clause::Search(needle) => {
                sql.conditions.push("(instr(LOWER(customer_name), ?) > 0 OR instr(LOWER(phone_number), ?) > 0)".to_string());
                sql.params.push(SqlParam::Text(needle.clone()));
                sql.params.push(SqlParam::Text(needle.clone()));
            }
            Clause::OneOf(field, values) => {
                let placeholders = vec!["?"; values.len()].join(", ");
                sql.conditions.push(format!("{} IN ({placeholders})", field.column()));
                sql.params.extend(values.iter().cloned().map(SqlParam::Text));
            }
            Clause::Tags(tags) => {
                let alternatives = vec![
                    "(tags = ? OR instr(',' || REPLACE(tags, ', ', ',') || ',', ?) > 0 OR instr(tags, ?) > 0)";
                    tags.len()
                ];
                sql.conditions.push(format!("({})", alternatives.join(" OR ")));

                for tag in tags {
                    sql.params.push(SqlParam::Text(tag.clone()));
                    sql.params.push(SqlParam::Text(format!(",{tag},")));
                    sql.params.push(SqlParam::Text(tag.clone()));
                }
            }
            Clause::Age(bucket) => {
                sql.conditions.push("age >= ?".to_string());
                sql.params.push(SqlParam::Integer(i64::from(bucket.min)));

                if let Some(max) = bucket.max {
                    sql.conditions.push("age <= ?".to_string());
                    sql.params.push(SqlParam::Integer(i64::from(max)));
                }
            }
            Clause::Date(bounds) => {
                sql.conditions.push("date >= ?".to_string());
                sql.conditions.push("date <= ?".to_string());
                sql.params.push(SqlParam::Text(bounds.start.to_string()));
                sql.params.push(SqlParam::Text(bounds.end.to_string()));
            }
        }
    }
}

/// The tags attribute is a comma-joined string, so a selected tag matches on the whole
/// field, on any single token, or anywhere inside the raw value.
fn tag_matches(raw_tags: &str, tag: &str) -> bool {
    raw_tags == tag
        || raw_tags.split(',').any(|token| token.trim() == tag)
        || raw_tags.contains(tag)
}

/// The conjunction of every active facet clause of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledFilter {
    clauses: Vec<Clause>
}

impl CompiledFilter {
    /// A filter that admits every record.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    /// The filter as a standalone predicate, e.g. for `Iterator::filter`.
    pub fn predicate(&self) -> impl Fn(&SaleRecord) -> bool + '_ {
        move |record| self.matches(record)
    }

    pub fn to_sql(&self) -> SqlFilter {
        let mut sql = SqlFilter::default();

        for clause in &self.clauses {
            clause.render(&mut sql);
        }

        sql
    }
}

/// Compiles [`FilterRequest`]s. Relative date presets resolve against `today`.
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler {
    today: NaiveDate
}

impl FilterCompiler {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// A compiler anchored to the local calendar date.
    pub fn local() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn compile(&self, request: &FilterRequest) -> Result<CompiledFilter, SalesError> {
        let mut clauses = Vec::new();

        if let Some(search) = request.search.as_deref().map(str::trim).filter(|search| !search.is_empty()) {
            clauses.push(Clause::Search(search.to_ascii_lowercase()));
        }

        let facets = [
            (FacetField::Region, &request.regions),
            (FacetField::Gender, &request.genders),
            (FacetField::Category, &request.categories)
        ];

        for (field, values) in facets {
            if !values.is_empty() {
                clauses.push(Clause::OneOf(field, values.clone()));
            }
        }

        if !request.tags.is_empty() {
            clauses.push(Clause::Tags(request.tags.clone()));
        }

        if !request.payment_methods.is_empty() {
            clauses.push(Clause::OneOf(FacetField::PaymentMethod, request.payment_methods.clone()));
        }

        if let Some(label) = request.age_range.as_deref() {
            clauses.push(Clause::Age(label.parse::<AgeBucket>()?));
        }

        if let Some(value) = request.date_range.as_deref() {
            if let Some(bounds) = DateBounds::parse(value, self.today)? {
                clauses.push(Clause::Date(bounds));
            }
        }

        debug!("Compiled filter with {} clause(s)", clauses.len());

        Ok(CompiledFilter { clauses })
    }
}
