//! Risk Dashboard Core Library
//!
//! Locates the local analytics databases and runs the dashboard's fixed,
//! read-only queries against them.

pub mod adapter;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod paths;
pub mod query;

pub use error::{CoreError, Result};
pub use gateway::QueryGateway;
