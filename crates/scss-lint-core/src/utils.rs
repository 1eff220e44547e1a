//! Utility functions for rule implementations.

pub mod allowance;
pub mod comments;

#[doc(inline)]
pub use allowance::{AllowCheck, Suppressions};
#[doc(inline)]
pub use comments::{comment_body, is_heading_comment};
