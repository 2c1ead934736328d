//! # Stack Bytecode
//!
//! A textual bytecode language for a small stack machine, with an
//! interpreter and a peephole optimizer that share one loader.
//!
//! Programs are plain UTF-8 text, one instruction per line. Lines that
//! are blank or start with `#` are ignored; a line ending in `:` declares
//! a label. Labels and literal integer positions are both valid jump
//! targets, so line positions are kept stable by retaining non-executable
//! lines as placeholders.
//!
//! ```text
//! PUSH 10
//! CALL double
//! PRINT
//! HALT
//! double:
//! DUP
//! ADD
//! RET
//! ```
//!
//! Run it with the [`mach::Runtime`] event loop, or rewrite it with
//! [`opt::Optimizer`] and feed the result back into the loader.

pub mod lang;
pub mod mach;
pub mod opt;
pub mod term;
