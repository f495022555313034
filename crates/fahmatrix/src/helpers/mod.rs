//! Stateless helpers layered on the public matrix contract.
//!
//! Nothing here adds invariants: every function takes `&Matrix` (or builds one
//! through the checked constructors) and returns a new value.
pub mod format;
pub mod random;
pub mod select;

pub use format::{format_matrix, FormatOptions};
pub use random::{random_diagonally_dominant, random_uniform};
pub use select::{head, head_default, select, tail, tail_default, DEFAULT_PREVIEW_ROWS};
