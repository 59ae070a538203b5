pub mod allocation;
pub mod config;
pub mod flow;
pub mod output_schema;
pub mod trade;

pub use allocation::{AllocationRule, SectorCategory};
pub use config::{Correction, IdentityConfig, OutputShape, PipelineConfig};
pub use flow::{AggregatedFlow, AllocatedFlow, FlowKey, OutputRow};
pub use trade::{Direction, ParseDirectionError, TradeRecord};
