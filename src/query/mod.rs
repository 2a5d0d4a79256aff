//! Filter and sort expression building.
//!
//! - [`condition`] - filter predicates and their validating constructors
//! - [`order`] - sort keys
//! - [`parser`] - rendering of conditions, sort keys and literals
//! - [`builder`] - accumulation and the full select statement

pub mod builder;
pub mod condition;
pub mod order;
pub mod parser;

pub use builder::{select_statement, QueryBuilder};
pub use condition::{Condition, LikeDirection, Operator};
pub use order::{OrderSpec, SortDir};
pub use parser::{format_value, render_condition, render_filter, render_order, render_orders};
