pub mod acquire;
pub mod config;
pub mod error;
pub mod sources;
pub mod tables;
pub mod writer;

pub use config::LoaderConfig;
pub use error::LoaderError;
pub use sources::TradeSource;
