//! Numeric opcode catalog
//!
//! Single-byte opcode values for the numeric instructions of the standard
//! WebAssembly binary encoding: comparisons (0x45..=0x66), integer
//! arithmetic and bitwise operations (0x67..=0x8A), and floating-point
//! arithmetic and sign operations (0x8B..=0xA6).
//!
//! The execution core treats these as opaque dispatch keys; the encoding
//! itself is owned by the decoder that produces them.

// i32 test and comparison operators
pub const I32_EQZ: u8 = 0x45;
pub const I32_EQ: u8 = 0x46;
pub const I32_NE: u8 = 0x47;
pub const I32_LT_S: u8 = 0x48;
pub const I32_LT_U: u8 = 0x49;
pub const I32_GT_S: u8 = 0x4A;
pub const I32_GT_U: u8 = 0x4B;
pub const I32_LE_S: u8 = 0x4C;
pub const I32_LE_U: u8 = 0x4D;
pub const I32_GE_S: u8 = 0x4E;
pub const I32_GE_U: u8 = 0x4F;

// i64 test and comparison operators
pub const I64_EQZ: u8 = 0x50;
pub const I64_EQ: u8 = 0x51;
pub const I64_NE: u8 = 0x52;
pub const I64_LT_S: u8 = 0x53;
pub const I64_LT_U: u8 = 0x54;
pub const I64_GT_S: u8 = 0x55;
pub const I64_GT_U: u8 = 0x56;
pub const I64_LE_S: u8 = 0x57;
pub const I64_LE_U: u8 = 0x58;
pub const I64_GE_S: u8 = 0x59;
pub const I64_GE_U: u8 = 0x5A;

// f32 comparison operators
pub const F32_EQ: u8 = 0x5B;
pub const F32_NE: u8 = 0x5C;
pub const F32_LT: u8 = 0x5D;
pub const F32_GT: u8 = 0x5E;
pub const F32_LE: u8 = 0x5F;
pub const F32_GE: u8 = 0x60;

// f64 comparison operators
pub const F64_EQ: u8 = 0x61;
pub const F64_NE: u8 = 0x62;
pub const F64_LT: u8 = 0x63;
pub const F64_GT: u8 = 0x64;
pub const F64_LE: u8 = 0x65;
pub const F64_GE: u8 = 0x66;

// i32 arithmetic and bitwise operators
pub const I32_CLZ: u8 = 0x67;
pub const I32_CTZ: u8 = 0x68;
pub const I32_POPCNT: u8 = 0x69;
pub const I32_ADD: u8 = 0x6A;
pub const I32_SUB: u8 = 0x6B;
pub const I32_MUL: u8 = 0x6C;
pub const I32_DIV_S: u8 = 0x6D;
pub const I32_DIV_U: u8 = 0x6E;
pub const I32_REM_S: u8 = 0x6F;
pub const I32_REM_U: u8 = 0x70;
pub const I32_AND: u8 = 0x71;
pub const I32_OR: u8 = 0x72;
pub const I32_XOR: u8 = 0x73;
pub const I32_SHL: u8 = 0x74;
pub const I32_SHR_S: u8 = 0x75;
pub const I32_SHR_U: u8 = 0x76;
pub const I32_ROTL: u8 = 0x77;
pub const I32_ROTR: u8 = 0x78;

// i64 arithmetic and bitwise operators
pub const I64_CLZ: u8 = 0x79;
pub const I64_CTZ: u8 = 0x7A;
pub const I64_POPCNT: u8 = 0x7B;
pub const I64_ADD: u8 = 0x7C;
pub const I64_SUB: u8 = 0x7D;
pub const I64_MUL: u8 = 0x7E;
pub const I64_DIV_S: u8 = 0x7F;
pub const I64_DIV_U: u8 = 0x80;
pub const I64_REM_S: u8 = 0x81;
pub const I64_REM_U: u8 = 0x82;
pub const I64_AND: u8 = 0x83;
pub const I64_OR: u8 = 0x84;
pub const I64_XOR: u8 = 0x85;
pub const I64_SHL: u8 = 0x86;
pub const I64_SHR_S: u8 = 0x87;
pub const I64_SHR_U: u8 = 0x88;
pub const I64_ROTL: u8 = 0x89;
pub const I64_ROTR: u8 = 0x8A;

// f32 arithmetic operators
pub const F32_ABS: u8 = 0x8B;
pub const F32_NEG: u8 = 0x8C;
pub const F32_CEIL: u8 = 0x8D;
pub const F32_FLOOR: u8 = 0x8E;
pub const F32_TRUNC: u8 = 0x8F;
pub const F32_NEAREST: u8 = 0x90;
pub const F32_SQRT: u8 = 0x91;
pub const F32_ADD: u8 = 0x92;
pub const F32_SUB: u8 = 0x93;
pub const F32_MUL: u8 = 0x94;
pub const F32_DIV: u8 = 0x95;
pub const F32_MIN: u8 = 0x96;
pub const F32_MAX: u8 = 0x97;
pub const F32_COPYSIGN: u8 = 0x98;

// f64 arithmetic operators
pub const F64_ABS: u8 = 0x99;
pub const F64_NEG: u8 = 0x9A;
pub const F64_CEIL: u8 = 0x9B;
pub const F64_FLOOR: u8 = 0x9C;
pub const F64_TRUNC: u8 = 0x9D;
pub const F64_NEAREST: u8 = 0x9E;
pub const F64_SQRT: u8 = 0x9F;
pub const F64_ADD: u8 = 0xA0;
pub const F64_SUB: u8 = 0xA1;
pub const F64_MUL: u8 = 0xA2;
pub const F64_DIV: u8 = 0xA3;
pub const F64_MIN: u8 = 0xA4;
pub const F64_MAX: u8 = 0xA5;
pub const F64_COPYSIGN: u8 = 0xA6;

/// Look up the canonical mnemonic for a numeric opcode.
///
/// Returns `None` for bytes outside the numeric instruction range
/// (control, parametric, variable, memory, const, and conversion opcodes
/// all live with their own collaborators).
pub fn name(opcode: u8) -> Option<&'static str> {
    let name = match opcode {
        I32_EQZ => "i32.eqz",
        I32_EQ => "i32.eq",
        I32_NE => "i32.ne",
        I32_LT_S => "i32.lt_s",
        I32_LT_U => "i32.lt_u",
        I32_GT_S => "i32.gt_s",
        I32_GT_U => "i32.gt_u",
        I32_LE_S => "i32.le_s",
        I32_LE_U => "i32.le_u",
        I32_GE_S => "i32.ge_s",
        I32_GE_U => "i32.ge_u",
        I64_EQZ => "i64.eqz",
        I64_EQ => "i64.eq",
        I64_NE => "i64.ne",
        I64_LT_S => "i64.lt_s",
        I64_LT_U => "i64.lt_u",
        I64_GT_S => "i64.gt_s",
        I64_GT_U => "i64.gt_u",
        I64_LE_S => "i64.le_s",
        I64_LE_U => "i64.le_u",
        I64_GE_S => "i64.ge_s",
        I64_GE_U => "i64.ge_u",
        F32_EQ => "f32.eq",
        F32_NE => "f32.ne",
        F32_LT => "f32.lt",
        F32_GT => "f32.gt",
        F32_LE => "f32.le",
        F32_GE => "f32.ge",
        F64_EQ => "f64.eq",
        F64_NE => "f64.ne",
        F64_LT => "f64.lt",
        F64_GT => "f64.gt",
        F64_LE => "f64.le",
        F64_GE => "f64.ge",
        I32_CLZ => "i32.clz",
        I32_CTZ => "i32.ctz",
        I32_POPCNT => "i32.popcnt",
        I32_ADD => "i32.add",
        I32_SUB => "i32.sub",
        I32_MUL => "i32.mul",
        I32_DIV_S => "i32.div_s",
        I32_DIV_U => "i32.div_u",
        I32_REM_S => "i32.rem_s",
        I32_REM_U => "i32.rem_u",
        I32_AND => "i32.and",
        I32_OR => "i32.or",
        I32_XOR => "i32.xor",
        I32_SHL => "i32.shl",
        I32_SHR_S => "i32.shr_s",
        I32_SHR_U => "i32.shr_u",
        I32_ROTL => "i32.rotl",
        I32_ROTR => "i32.rotr",
        I64_CLZ => "i64.clz",
        I64_CTZ => "i64.ctz",
        I64_POPCNT => "i64.popcnt",
        I64_ADD => "i64.add",
        I64_SUB => "i64.sub",
        I64_MUL => "i64.mul",
        I64_DIV_S => "i64.div_s",
        I64_DIV_U => "i64.div_u",
        I64_REM_S => "i64.rem_s",
        I64_REM_U => "i64.rem_u",
        I64_AND => "i64.and",
        I64_OR => "i64.or",
        I64_XOR => "i64.xor",
        I64_SHL => "i64.shl",
        I64_SHR_S => "i64.shr_s",
        I64_SHR_U => "i64.shr_u",
        I64_ROTL => "i64.rotl",
        I64_ROTR => "i64.rotr",
        F32_ABS => "f32.abs",
        F32_NEG => "f32.neg",
        F32_CEIL => "f32.ceil",
        F32_FLOOR => "f32.floor",
        F32_TRUNC => "f32.trunc",
        F32_NEAREST => "f32.nearest",
        F32_SQRT => "f32.sqrt",
        F32_ADD => "f32.add",
        F32_SUB => "f32.sub",
        F32_MUL => "f32.mul",
        F32_DIV => "f32.div",
        F32_MIN => "f32.min",
        F32_MAX => "f32.max",
        F32_COPYSIGN => "f32.copysign",
        F64_ABS => "f64.abs",
        F64_NEG => "f64.neg",
        F64_CEIL => "f64.ceil",
        F64_FLOOR => "f64.floor",
        F64_TRUNC => "f64.trunc",
        F64_NEAREST => "f64.nearest",
        F64_SQRT => "f64.sqrt",
        F64_ADD => "f64.add",
        F64_SUB => "f64.sub",
        F64_MUL => "f64.mul",
        F64_DIV => "f64.div",
        F64_MIN => "f64.min",
        F64_MAX => "f64.max",
        F64_COPYSIGN => "f64.copysign",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        assert_eq!(name(I32_SHL), Some("i32.shl"));
        assert_eq!(name(I64_ROTL), Some("i64.rotl"));
        assert_eq!(name(F32_COPYSIGN), Some("f32.copysign"));
        assert_eq!(name(F64_SUB), Some("f64.sub"));
    }

    #[test]
    fn test_non_numeric_bytes_have_no_name() {
        // Control and memory opcodes are outside this catalog
        assert_eq!(name(0x00), None); // unreachable
        assert_eq!(name(0x10), None); // call
        assert_eq!(name(0x28), None); // i32.load
        assert_eq!(name(0x41), None); // i32.const
        assert_eq!(name(0xA7), None); // i32.wrap_i64
        assert_eq!(name(0xFF), None);
    }

    #[test]
    fn test_numeric_range_is_contiguous() {
        // Every byte from i32.eqz through f64.copysign is a defined
        // numeric instruction
        for op in I32_EQZ..=F64_COPYSIGN {
            assert!(name(op).is_some(), "missing name for opcode 0x{:02x}", op);
        }
    }
}
