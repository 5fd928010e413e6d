//! Query Builder
//!
//! Turns a set of optional search criteria into a conjunctive filter the
//! storage engine can execute:
//! - `SearchCriteria`: the filter configuration as collected by a front end
//! - `FrameFilter`: the validated, normalized filter
//! - `SqlFragment`: the parameterized WHERE clause a filter compiles to

pub mod criteria;
pub mod filter;

pub use criteria::SearchCriteria;
pub use filter::{FrameFilter, SqlFragment, TextField};
