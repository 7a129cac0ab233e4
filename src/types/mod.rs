mod errors;
mod monetary;
#[cfg(test)]
mod tests;

pub use errors::MonetaryError;
pub use monetary::{from_minor_units, to_minor_units, MINOR_UNIT_SCALE};

pub type TransactionId = String;
pub type Age = u32;
pub type Quantity = u32;
