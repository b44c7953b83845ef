//! Flat filter syntax for logic trees.
//!
//! A compact, single-line way to write a [`LogicNode`](crate::LogicNode),
//! mainly for the command line.
//!
//! # Supported Syntax
//!
//! ## Clauses
//! - `field operator value`, e.g. `title contains milk`
//! - `field exists`, `field notExists` take no value
//! - Field and operator names match the JSON names, ignoring case
//! - Symbolic operators: `=`, `==`, `!=`, `<>`, `<`, `>`, `<=`, `>=`, `~` (matches), `!~` (notMatches)
//!
//! ## Values
//! - `true`, `false`, `null` and numbers are typed
//! - Bare words are strings; consecutive words join with a space (`dueDate before next friday`)
//! - `"quoted"` or `'quoted'` strings keep their content verbatim
//! - `[a, b, "c d"]` lists
//!
//! ## Boolean Operators
//! - `AND` / `&&`
//! - `OR` / `||`
//! - `NOT` / `!`
//!
//! There is no parenthesized grouping: `NOT` binds tighter than `AND`, which
//! binds tighter than `OR`.
//!
//! # Example
//!
//! ```
//! use reminders_query_rs::filter::parse_filter;
//!
//! let node = parse_filter("priority = high OR NOT completed = true").unwrap();
//! assert_eq!(node.any.as_ref().map(Vec::len), Some(2));
//! ```

mod error;
mod lexer;
mod parser;

pub use error::{FilterError, FilterResult};
pub use parser::{parse_filter, FilterParser};
