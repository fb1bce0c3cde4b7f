//! FEA-Bench dataset records and their conversion into instances

pub mod fields;
pub mod loader;
pub mod mapper;
pub mod types;

pub use fields::{extra_field_names, FieldDefault, EXTRA_FIELDS};
pub use loader::{InstanceLoader, LoadReport, SkippedRecord};
pub use mapper::{extra_fields, InstanceMapper};
pub use types::{ProblemInfo, RawRecord};
