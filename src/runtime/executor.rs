//! Instruction executor
//!
//! One executor per interpreter instance: it owns the instance's operand
//! stack and resolves opcodes against a dispatch table. The driving
//! collaborator (decoder/control flow) seeds operands with the push
//! methods, executes instructions one at a time with [`Executor::dispatch`],
//! and retrieves results with the pop methods. Execution is strictly
//! sequential within an instance; separate instances may run on separate
//! threads sharing one table.

use super::{dispatch, DispatchTable, Stack, Trap};
use crate::opcode;

/// Executes numeric instructions against an owned operand stack.
pub struct Executor<'a> {
    stack: Stack,
    table: &'a DispatchTable,
}

impl Executor<'static> {
    /// Create an executor backed by the shared process-wide dispatch table
    pub fn new() -> Self {
        Executor {
            stack: Stack::new(),
            table: dispatch::shared(),
        }
    }
}

impl Default for Executor<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Executor<'a> {
    /// Create an executor over a caller-owned dispatch table
    pub fn with_table(table: &'a DispatchTable) -> Self {
        Executor {
            stack: Stack::new(),
            table,
        }
    }

    /// Execute exactly one instruction against this instance's stack.
    ///
    /// A trap raised by the handler is wrapped with the instruction's
    /// mnemonic so the failure is attributable to this dispatch.
    /// Dispatching an opcode with no installed handler is
    /// [`Trap::UnassignedOpcode`]; decoders are expected to reject such
    /// opcodes before execution via [`DispatchTable::is_assigned`].
    pub fn dispatch(&mut self, op: u8) -> Result<(), Trap> {
        let handler = self.table.handler(op).ok_or(Trap::UnassignedOpcode(op))?;
        handler(&mut self.stack).map_err(|source| Trap::Instruction {
            instruction: opcode::name(op).unwrap_or("unknown"),
            source: Box::new(source),
        })
    }

    /// Seed a 32-bit integer operand
    pub fn push_i32(&mut self, value: i32) {
        self.stack.push_i32(value);
    }

    /// Seed a 64-bit integer operand
    pub fn push_i64(&mut self, value: i64) {
        self.stack.push_i64(value);
    }

    /// Seed a 32-bit float operand
    pub fn push_f32(&mut self, value: f32) {
        self.stack.push_f32(value);
    }

    /// Seed a 64-bit float operand
    pub fn push_f64(&mut self, value: f64) {
        self.stack.push_f64(value);
    }

    /// Retrieve a 32-bit integer result
    pub fn pop_i32(&mut self) -> Result<i32, Trap> {
        self.stack.pop_i32()
    }

    /// Retrieve a 64-bit integer result
    pub fn pop_i64(&mut self) -> Result<i64, Trap> {
        self.stack.pop_i64()
    }

    /// Retrieve a 32-bit float result
    pub fn pop_f32(&mut self) -> Result<f32, Trap> {
        self.stack.pop_f32()
    }

    /// Retrieve a 64-bit float result
    pub fn pop_f64(&mut self) -> Result<f64, Trap> {
        self.stack.pop_f64()
    }

    /// Current operand stack depth
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_executes_one_instruction() {
        let mut exec = Executor::new();
        exec.push_i32(-1);
        exec.push_i32(200);
        exec.dispatch(opcode::I32_SHL).unwrap();
        assert_eq!(exec.pop_i32().unwrap(), -256);
        assert_eq!(exec.depth(), 0);
    }

    #[test]
    fn test_dispatch_chains_through_the_stack() {
        // (5 + 3) * 2 using consecutive dispatches
        let mut exec = Executor::new();
        exec.push_i32(5);
        exec.push_i32(3);
        exec.dispatch(opcode::I32_ADD).unwrap();
        exec.push_i32(2);
        exec.dispatch(opcode::I32_MUL).unwrap();
        assert_eq!(exec.pop_i32().unwrap(), 16);
    }

    #[test]
    fn test_unassigned_opcode() {
        let mut exec = Executor::new();
        // i32.const is the decoder's responsibility, not a table entry
        assert!(matches!(
            exec.dispatch(0x41),
            Err(Trap::UnassignedOpcode(0x41))
        ));
    }

    #[test]
    fn test_trap_names_the_instruction() {
        let mut exec = Executor::new();
        exec.push_i32(1);
        exec.push_i32(0);
        let err = exec.dispatch(opcode::I32_DIV_S).unwrap_err();
        assert_eq!(err.to_string(), "Trap in i32.div_s: Division by zero");

        let err = exec.dispatch(opcode::I64_ADD).unwrap_err();
        assert_eq!(err.to_string(), "Trap in i64.add: Stack underflow");
    }

    #[test]
    fn test_with_table_uses_caller_table() {
        let table = DispatchTable::new();
        let mut exec = Executor::with_table(&table);
        exec.push_f64(3.0);
        exec.push_f64(2.0);
        exec.dispatch(opcode::F64_SUB).unwrap();
        assert_eq!(exec.pop_f64().unwrap(), 1.0);
    }

    #[test]
    fn test_instances_do_not_share_stacks() {
        let mut a = Executor::new();
        let mut b = Executor::new();
        a.push_i32(1);
        assert_eq!(a.depth(), 1);
        assert_eq!(b.depth(), 0);
        assert!(matches!(b.pop_i32(), Err(Trap::StackUnderflow)));
        assert_eq!(a.pop_i32().unwrap(), 1);
    }
}
