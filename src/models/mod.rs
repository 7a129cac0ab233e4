mod errors;
mod sale;

pub use errors::SalesError;
pub use sale::SaleRecord;

/// A categorical attribute of a sale that can be filtered on and enumerated.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FacetField {
    Region,
    Gender,
    Category,
    PaymentMethod,
    Tags
}

impl FacetField {
    /// Column holding this facet in the relational `sales` table.
    pub fn column(self) -> &'static str {
        match self {
            FacetField::Region => "customer_region",
            FacetField::Gender => "gender",
            FacetField::Category => "product_category",
            FacetField::PaymentMethod => "payment_method",
            FacetField::Tags => "tags"
        }
    }
}
