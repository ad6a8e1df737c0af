//! Opcode dispatch table
//!
//! A 256-slot array of handler function pointers indexed by the raw opcode
//! byte. Handlers take the operand stack as an explicit parameter and
//! capture nothing, so a table is immutable once built and may be shared
//! read-only across any number of concurrently-running executors, each
//! owning its own stack.

use once_cell::sync::Lazy;

use super::{ops, Stack, Trap};
use crate::opcode;

/// An instruction handler: pop operands, compute, push the result.
pub type Handler = fn(&mut Stack) -> Result<(), Trap>;

/// Immutable opcode-to-handler mapping.
pub struct DispatchTable {
    handlers: [Option<Handler>; 256],
}

impl DispatchTable {
    /// Build a table by installing a handler for every defined numeric
    /// opcode. Slots for opcodes outside the numeric families stay empty;
    /// dispatching one is a configuration error, not an execution fault.
    pub fn new() -> Self {
        let mut handlers: [Option<Handler>; 256] = [None; 256];
        for &(op, handler) in CATALOG {
            debug_assert!(
                handlers[op as usize].is_none(),
                "opcode 0x{:02x} installed twice",
                op
            );
            handlers[op as usize] = Some(handler);
        }
        DispatchTable { handlers }
    }

    /// Look up the handler for an opcode
    pub fn handler(&self, opcode: u8) -> Option<Handler> {
        self.handlers[opcode as usize]
    }

    /// Check whether an opcode has a handler installed; decoders can use
    /// this to reject undispatched opcodes before execution starts
    pub fn is_assigned(&self, opcode: u8) -> bool {
        self.handlers[opcode as usize].is_some()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED: Lazy<DispatchTable> = Lazy::new(DispatchTable::new);

/// The process-wide dispatch table, built on first use and shared
/// read-only between executor instances.
pub fn shared() -> &'static DispatchTable {
    &SHARED
}

/// Every defined numeric opcode paired with its handler.
const CATALOG: &[(u8, Handler)] = &[
    // i32 test and comparison
    (opcode::I32_EQZ, ops::comparison::i32_eqz),
    (opcode::I32_EQ, ops::comparison::i32_eq),
    (opcode::I32_NE, ops::comparison::i32_ne),
    (opcode::I32_LT_S, ops::comparison::i32_lt_s),
    (opcode::I32_LT_U, ops::comparison::i32_lt_u),
    (opcode::I32_GT_S, ops::comparison::i32_gt_s),
    (opcode::I32_GT_U, ops::comparison::i32_gt_u),
    (opcode::I32_LE_S, ops::comparison::i32_le_s),
    (opcode::I32_LE_U, ops::comparison::i32_le_u),
    (opcode::I32_GE_S, ops::comparison::i32_ge_s),
    (opcode::I32_GE_U, ops::comparison::i32_ge_u),
    // i64 test and comparison
    (opcode::I64_EQZ, ops::comparison::i64_eqz),
    (opcode::I64_EQ, ops::comparison::i64_eq),
    (opcode::I64_NE, ops::comparison::i64_ne),
    (opcode::I64_LT_S, ops::comparison::i64_lt_s),
    (opcode::I64_LT_U, ops::comparison::i64_lt_u),
    (opcode::I64_GT_S, ops::comparison::i64_gt_s),
    (opcode::I64_GT_U, ops::comparison::i64_gt_u),
    (opcode::I64_LE_S, ops::comparison::i64_le_s),
    (opcode::I64_LE_U, ops::comparison::i64_le_u),
    (opcode::I64_GE_S, ops::comparison::i64_ge_s),
    (opcode::I64_GE_U, ops::comparison::i64_ge_u),
    // f32 comparison
    (opcode::F32_EQ, ops::comparison::f32_eq),
    (opcode::F32_NE, ops::comparison::f32_ne),
    (opcode::F32_LT, ops::comparison::f32_lt),
    (opcode::F32_GT, ops::comparison::f32_gt),
    (opcode::F32_LE, ops::comparison::f32_le),
    (opcode::F32_GE, ops::comparison::f32_ge),
    // f64 comparison
    (opcode::F64_EQ, ops::comparison::f64_eq),
    (opcode::F64_NE, ops::comparison::f64_ne),
    (opcode::F64_LT, ops::comparison::f64_lt),
    (opcode::F64_GT, ops::comparison::f64_gt),
    (opcode::F64_LE, ops::comparison::f64_le),
    (opcode::F64_GE, ops::comparison::f64_ge),
    // i32 arithmetic and bitwise
    (opcode::I32_CLZ, ops::numeric::i32_clz),
    (opcode::I32_CTZ, ops::numeric::i32_ctz),
    (opcode::I32_POPCNT, ops::numeric::i32_popcnt),
    (opcode::I32_ADD, ops::numeric::i32_add),
    (opcode::I32_SUB, ops::numeric::i32_sub),
    (opcode::I32_MUL, ops::numeric::i32_mul),
    (opcode::I32_DIV_S, ops::numeric::i32_div_s),
    (opcode::I32_DIV_U, ops::numeric::i32_div_u),
    (opcode::I32_REM_S, ops::numeric::i32_rem_s),
    (opcode::I32_REM_U, ops::numeric::i32_rem_u),
    (opcode::I32_AND, ops::bitwise::i32_and),
    (opcode::I32_OR, ops::bitwise::i32_or),
    (opcode::I32_XOR, ops::bitwise::i32_xor),
    (opcode::I32_SHL, ops::bitwise::i32_shl),
    (opcode::I32_SHR_S, ops::bitwise::i32_shr_s),
    (opcode::I32_SHR_U, ops::bitwise::i32_shr_u),
    (opcode::I32_ROTL, ops::bitwise::i32_rotl),
    (opcode::I32_ROTR, ops::bitwise::i32_rotr),
    // i64 arithmetic and bitwise
    (opcode::I64_CLZ, ops::numeric::i64_clz),
    (opcode::I64_CTZ, ops::numeric::i64_ctz),
    (opcode::I64_POPCNT, ops::numeric::i64_popcnt),
    (opcode::I64_ADD, ops::numeric::i64_add),
    (opcode::I64_SUB, ops::numeric::i64_sub),
    (opcode::I64_MUL, ops::numeric::i64_mul),
    (opcode::I64_DIV_S, ops::numeric::i64_div_s),
    (opcode::I64_DIV_U, ops::numeric::i64_div_u),
    (opcode::I64_REM_S, ops::numeric::i64_rem_s),
    (opcode::I64_REM_U, ops::numeric::i64_rem_u),
    (opcode::I64_AND, ops::bitwise::i64_and),
    (opcode::I64_OR, ops::bitwise::i64_or),
    (opcode::I64_XOR, ops::bitwise::i64_xor),
    (opcode::I64_SHL, ops::bitwise::i64_shl),
    (opcode::I64_SHR_S, ops::bitwise::i64_shr_s),
    (opcode::I64_SHR_U, ops::bitwise::i64_shr_u),
    (opcode::I64_ROTL, ops::bitwise::i64_rotl),
    (opcode::I64_ROTR, ops::bitwise::i64_rotr),
    // f32 arithmetic
    (opcode::F32_ABS, ops::numeric::f32_abs),
    (opcode::F32_NEG, ops::numeric::f32_neg),
    (opcode::F32_CEIL, ops::numeric::f32_ceil),
    (opcode::F32_FLOOR, ops::numeric::f32_floor),
    (opcode::F32_TRUNC, ops::numeric::f32_trunc),
    (opcode::F32_NEAREST, ops::numeric::f32_nearest),
    (opcode::F32_SQRT, ops::numeric::f32_sqrt),
    (opcode::F32_ADD, ops::numeric::f32_add),
    (opcode::F32_SUB, ops::numeric::f32_sub),
    (opcode::F32_MUL, ops::numeric::f32_mul),
    (opcode::F32_DIV, ops::numeric::f32_div),
    (opcode::F32_MIN, ops::numeric::f32_min),
    (opcode::F32_MAX, ops::numeric::f32_max),
    (opcode::F32_COPYSIGN, ops::numeric::f32_copysign),
    // f64 arithmetic
    (opcode::F64_ABS, ops::numeric::f64_abs),
    (opcode::F64_NEG, ops::numeric::f64_neg),
    (opcode::F64_CEIL, ops::numeric::f64_ceil),
    (opcode::F64_FLOOR, ops::numeric::f64_floor),
    (opcode::F64_TRUNC, ops::numeric::f64_trunc),
    (opcode::F64_NEAREST, ops::numeric::f64_nearest),
    (opcode::F64_SQRT, ops::numeric::f64_sqrt),
    (opcode::F64_ADD, ops::numeric::f64_add),
    (opcode::F64_SUB, ops::numeric::f64_sub),
    (opcode::F64_MUL, ops::numeric::f64_mul),
    (opcode::F64_DIV, ops::numeric::f64_div),
    (opcode::F64_MIN, ops::numeric::f64_min),
    (opcode::F64_MAX, ops::numeric::f64_max),
    (opcode::F64_COPYSIGN, ops::numeric::f64_copysign),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_named_opcode_has_a_handler() {
        let table = DispatchTable::new();
        for op in 0u16..=255 {
            let op = op as u8;
            assert_eq!(
                table.is_assigned(op),
                opcode::name(op).is_some(),
                "catalog and name lookup disagree on opcode 0x{:02x}",
                op
            );
        }
    }

    #[test]
    fn test_catalog_has_no_duplicates() {
        let mut seen = [false; 256];
        for &(op, _) in CATALOG {
            assert!(!seen[op as usize], "opcode 0x{:02x} listed twice", op);
            seen[op as usize] = true;
        }
    }

    #[test]
    fn test_handler_lookup_and_invoke() {
        let table = DispatchTable::new();
        let mut stack = Stack::new();
        stack.push_i32(2);
        stack.push_i32(3);

        let add = table.handler(opcode::I32_ADD).unwrap();
        add(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 5);

        assert!(table.handler(0x00).is_none());
        assert!(table.handler(0xFF).is_none());
    }

    #[test]
    fn test_shared_table_is_usable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                std::thread::spawn(move || {
                    let table = shared();
                    let mut stack = Stack::new();
                    stack.push_i32(n);
                    stack.push_i32(1);
                    table.handler(opcode::I32_ADD).unwrap()(&mut stack).unwrap();
                    stack.pop_i32().unwrap()
                })
            })
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), n as i32 + 1);
        }
    }
}
