//! Execution engine for the numeric instruction set
//!
//! This module provides the operand stack, the opcode dispatch table, and
//! the executor that drives instruction handlers against a stack.

pub mod dispatch;
pub mod executor;
pub mod ops;
pub mod stack;

pub use dispatch::{DispatchTable, Handler};
pub use executor::Executor;
pub use stack::Stack;

/// A fatal, synchronously-reported execution fault.
///
/// Traps are never recovered from inside this core; they propagate to the
/// driving interpreter, which decides whether to abort the whole run or
/// just the current activation. Floating-point operations never trap:
/// NaN and infinity results are ordinary values.
#[derive(Debug, thiserror::Error)]
pub enum Trap {
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow")]
    IntegerOverflow,
    #[error("No handler installed for opcode 0x{0:02x}")]
    UnassignedOpcode(u8),
    #[error("Trap in {instruction}: {source}")]
    Instruction {
        instruction: &'static str,
        #[source]
        source: Box<Trap>,
    },
}
