//! Catalog records and the predicate engine used to query them in memory.
//!
//! A [`Record`] is one decoded catalog entity: an open set of named JSON
//! fields with typed accessors. A [`Filter`] is a composable boolean test over
//! a record. Every filter is total: a missing field or a value of the wrong
//! type makes the filter return `false`, never an error.
//!
//! # Example
//!
//! ```rust
//! use dank_filter::{Filter, Predicate, Record};
//! use serde_json::json;
//!
//! let record: Record = serde_json::from_value(json!({
//!     "id": 7,
//!     "name": "Steel Sword",
//!     "price": 15
//! }))
//! .unwrap();
//!
//! let filter = Filter::contains_any("name", ["sword"]).and(Filter::range("price", 10.0, 20.0));
//! assert!(filter.matches(&record));
//! ```

mod filter;
mod record;
pub mod similarity;

pub use filter::{DEFAULT_FUZZY_CUTOFF, Filter, Predicate, filter_records};
pub use record::{Record, RecordId};
pub use similarity::{levenshtein, similarity};
