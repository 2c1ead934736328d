/*!
# Language Module

This module provides source-line classification and error reporting
for the bytecode language.

*/

#[macro_use]
mod error;
mod line;

pub use error::Error;
pub use error::ErrorCode;
pub use line::Instr;
pub use line::Line;

/// 1-based source line number attached to runtime errors.
pub type LineNumber = Option<usize>;
