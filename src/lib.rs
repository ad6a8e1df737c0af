//! The numeric execution core of a WebAssembly stack-machine interpreter.
//!
//! wexec implements the half of an interpreter that turns resolved opcodes
//! into operand-stack transitions: the operand stack itself, the
//! opcode-to-handler dispatch table, and the numeric instruction set
//! (integer arithmetic, bitwise, shift and rotate operations;
//! floating-point arithmetic and sign manipulation). Bytecode decoding,
//! validation, control flow, locals/globals, and linear memory belong to
//! the embedding interpreter, which feeds this core one opcode at a time
//! and reads results back off the stack.
//!
//! # Modules
//!
//! - [`opcode`] -- The single-byte numeric opcode catalog of the standard
//!   binary encoding, plus mnemonic lookup.
//! - [`runtime`] -- Operand stack, dispatch table, executor, and the
//!   instruction handlers.
//!
//! # Example
//!
//! Seed two operands, execute one instruction, read the result:
//!
//! ```
//! use wexec::opcode;
//! use wexec::runtime::Executor;
//!
//! let mut exec = Executor::new();
//! exec.push_i32(-1);
//! exec.push_i32(200);
//! exec.dispatch(opcode::I32_SHR_U).unwrap();
//! // The shift count is taken modulo 32, so 200 behaves as 8.
//! assert_eq!(exec.pop_i32().unwrap(), 0xFF_FFFF);
//! ```

pub mod opcode;
pub mod runtime;
