//! Translation of dashboard filter selections into a record predicate.
//!
//! A [`FilterRequest`] is compiled once into a [`CompiledFilter`], which can be evaluated
//! directly against records or rendered as parameterized SQL. Both renderings come from the
//! same clause list and must select the same records.

mod compiler;
mod params;
mod ranges;
mod request;

pub use compiler::{CompiledFilter, FilterCompiler, SqlFilter, SqlParam};
pub use params::{normalize_facet, FacetInput, RawFilterParams};
pub use ranges::{AgeBucket, DateBounds, DateRangePreset, AGE_BUCKETS};
pub use request::{FilterRequest, PageLimits};
