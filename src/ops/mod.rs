//! Operations exposed to the tool layer.

mod query;


pub use query::{QueryOps, QueryOption};
