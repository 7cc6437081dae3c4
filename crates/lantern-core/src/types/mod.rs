//! Shared value types used by every analyzer and by the report layer.

pub mod collections;
pub mod environment;
pub mod issue;
