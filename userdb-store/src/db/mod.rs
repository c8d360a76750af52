//! Database layer - connection gateway, schema, write and read paths
//!
//! # Design Principles
//!
//! - One connection per operation, opened and released by the gateway
//! - Every statement is parameterized
//! - Writes are all-or-nothing (transaction or COPY stream)
//! - Driver errors are translated at the operation boundary

pub mod copy;
pub mod gateway;
pub mod reader;
pub mod schema;
pub mod writer;

pub use gateway::{ConnectionGateway, ScopedConnection};
pub use reader::SearchField;
pub use writer::WriteStrategy;
