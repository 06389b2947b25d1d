//! Wire codec for the call boundary
//!
//! The host speaks a textual nested-array format:
//!
//! ```text
//! ["Group","Operation",12.5,true,nil,["nested","array"]]
//! ```
//!
//! # Grammar
//!
//! - Arrays: `[` values separated by `,` `]`
//! - Strings: double quoted, embedded `"` doubled (single quotes accepted on decode)
//! - Numbers: bare, `.` decimal point, never grouped
//! - Booleans: bare `true` / `false`
//! - Null: bare `nil` (`null` accepted on decode)

mod codec;
mod errors;
mod value;

pub use codec::{decode, encode, MAX_DEPTH};
pub use errors::{WireError, WireResult};
pub use value::WireValue;
