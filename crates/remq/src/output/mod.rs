//! Output formatting utilities for the remq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by what is being shown:
//!
//! - [`records`] - Search responses (record tables, page footer)
//! - [`groups`] - Group trees
//! - [`lists`] - List summaries
//! - [`helpers`] - Common formatting utilities (truncation, priority, due dates)

mod groups;
pub mod helpers;
mod lists;
mod records;

pub use helpers::DateFormat;
pub use lists::{format_lists_json, format_lists_table};
pub use records::{format_response_json, format_response_table};
