pub mod engine;
pub mod request;
pub mod tables;
pub mod validation;

pub use engine::{estimate_value, FactorBreakdown, Valuation};
pub use request::{BrandTier, Category, ComponentShare, Condition, ValuationRequest};
pub use tables::RuleTables;
pub use validation::{validate_request, validate_tables};
