/*!
## Machine Module

This module is the stack virtual machine for the bytecode language.
It has no registers; every operation works on the operand stack.

*/

/// Index into the instruction table.
pub type Address = usize;

mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod var;

#[cfg(test)]
mod tests;

pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use var::Var;
