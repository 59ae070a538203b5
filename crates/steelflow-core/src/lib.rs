pub mod aggregate;
pub mod categories;
pub mod correction;
pub mod error;
pub mod format;
pub mod join;
pub mod mass;
pub mod pipeline;
pub mod validate;

pub use aggregate::aggregate;
pub use categories::SectorCategories;
pub use correction::{apply_correction, apply_corrections};
pub use error::{DataIntegrityError, PipelineError, ValidationError};
pub use format::{format_rows, shape_tables, OutputTable, TableName};
pub use join::{expand, AllocationTable, JoinReport};
pub use pipeline::{Pipeline, PipelineOutput};
