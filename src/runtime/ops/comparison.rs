//! Test and comparison operations
//!
//! All comparison operations push an i32 result: 1 for true, 0 for false.
//! Signedness is chosen per-operation; the float comparisons follow IEEE
//! 754 ordering, so NaN compares unequal to everything including itself.

use super::*;

// ============================================================================
// i32 Test and Comparison Operations
// ============================================================================

/// i32.eqz - Test if zero
pub fn i32_eqz(stack: &mut Stack) -> Result<(), Trap> {
    let value = stack.pop_i32()?;
    stack.push_i32(if value == 0 { 1 } else { 0 });
    Ok(())
}

/// i32.eq - Test equality
pub fn i32_eq(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if a == b { 1 } else { 0 });
    Ok(())
}

/// i32.ne - Test inequality
pub fn i32_ne(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if a != b { 1 } else { 0 });
    Ok(())
}

/// i32.lt_s - Test a < b (signed)
pub fn i32_lt_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if a < b { 1 } else { 0 });
    Ok(())
}

/// i32.lt_u - Test a < b (unsigned)
pub fn i32_lt_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if (a as u32) < (b as u32) { 1 } else { 0 });
    Ok(())
}

/// i32.gt_s - Test a > b (signed)
pub fn i32_gt_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if a > b { 1 } else { 0 });
    Ok(())
}

/// i32.gt_u - Test a > b (unsigned)
pub fn i32_gt_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if (a as u32) > (b as u32) { 1 } else { 0 });
    Ok(())
}

/// i32.le_s - Test a <= b (signed)
pub fn i32_le_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if a <= b { 1 } else { 0 });
    Ok(())
}

/// i32.le_u - Test a <= b (unsigned)
pub fn i32_le_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if (a as u32) <= (b as u32) { 1 } else { 0 });
    Ok(())
}

/// i32.ge_s - Test a >= b (signed)
pub fn i32_ge_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if a >= b { 1 } else { 0 });
    Ok(())
}

/// i32.ge_u - Test a >= b (unsigned)
pub fn i32_ge_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i32()?;
    let a = stack.pop_i32()?;
    stack.push_i32(if (a as u32) >= (b as u32) { 1 } else { 0 });
    Ok(())
}

// ============================================================================
// i64 Test and Comparison Operations
// ============================================================================

/// i64.eqz - Test if zero
pub fn i64_eqz(stack: &mut Stack) -> Result<(), Trap> {
    let value = stack.pop_i64()?;
    stack.push_i32(if value == 0 { 1 } else { 0 });
    Ok(())
}

/// i64.eq - Test equality
pub fn i64_eq(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if a == b { 1 } else { 0 });
    Ok(())
}

/// i64.ne - Test inequality
pub fn i64_ne(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if a != b { 1 } else { 0 });
    Ok(())
}

/// i64.lt_s - Test a < b (signed)
pub fn i64_lt_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if a < b { 1 } else { 0 });
    Ok(())
}

/// i64.lt_u - Test a < b (unsigned)
pub fn i64_lt_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if (a as u64) < (b as u64) { 1 } else { 0 });
    Ok(())
}

/// i64.gt_s - Test a > b (signed)
pub fn i64_gt_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if a > b { 1 } else { 0 });
    Ok(())
}

/// i64.gt_u - Test a > b (unsigned)
pub fn i64_gt_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if (a as u64) > (b as u64) { 1 } else { 0 });
    Ok(())
}

/// i64.le_s - Test a <= b (signed)
pub fn i64_le_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if a <= b { 1 } else { 0 });
    Ok(())
}

/// i64.le_u - Test a <= b (unsigned)
pub fn i64_le_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if (a as u64) <= (b as u64) { 1 } else { 0 });
    Ok(())
}

/// i64.ge_s - Test a >= b (signed)
pub fn i64_ge_s(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if a >= b { 1 } else { 0 });
    Ok(())
}

/// i64.ge_u - Test a >= b (unsigned)
pub fn i64_ge_u(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_i64()?;
    let a = stack.pop_i64()?;
    stack.push_i32(if (a as u64) >= (b as u64) { 1 } else { 0 });
    Ok(())
}

// ============================================================================
// f32 Comparison Operations
// ============================================================================

/// f32.eq - Test equality (NaN != NaN)
pub fn f32_eq(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f32()?;
    let a = stack.pop_f32()?;
    stack.push_i32(if a == b { 1 } else { 0 });
    Ok(())
}

/// f32.ne - Test inequality (NaN != anything is true)
pub fn f32_ne(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f32()?;
    let a = stack.pop_f32()?;
    stack.push_i32(if a != b { 1 } else { 0 });
    Ok(())
}

/// f32.lt - Test a < b
pub fn f32_lt(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f32()?;
    let a = stack.pop_f32()?;
    stack.push_i32(if a < b { 1 } else { 0 });
    Ok(())
}

/// f32.gt - Test a > b
pub fn f32_gt(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f32()?;
    let a = stack.pop_f32()?;
    stack.push_i32(if a > b { 1 } else { 0 });
    Ok(())
}

/// f32.le - Test a <= b
pub fn f32_le(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f32()?;
    let a = stack.pop_f32()?;
    stack.push_i32(if a <= b { 1 } else { 0 });
    Ok(())
}

/// f32.ge - Test a >= b
pub fn f32_ge(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f32()?;
    let a = stack.pop_f32()?;
    stack.push_i32(if a >= b { 1 } else { 0 });
    Ok(())
}

// ============================================================================
// f64 Comparison Operations
// ============================================================================

/// f64.eq - Test equality (NaN != NaN)
pub fn f64_eq(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f64()?;
    let a = stack.pop_f64()?;
    stack.push_i32(if a == b { 1 } else { 0 });
    Ok(())
}

/// f64.ne - Test inequality (NaN != anything is true)
pub fn f64_ne(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f64()?;
    let a = stack.pop_f64()?;
    stack.push_i32(if a != b { 1 } else { 0 });
    Ok(())
}

/// f64.lt - Test a < b
pub fn f64_lt(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f64()?;
    let a = stack.pop_f64()?;
    stack.push_i32(if a < b { 1 } else { 0 });
    Ok(())
}

/// f64.gt - Test a > b
pub fn f64_gt(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f64()?;
    let a = stack.pop_f64()?;
    stack.push_i32(if a > b { 1 } else { 0 });
    Ok(())
}

/// f64.le - Test a <= b
pub fn f64_le(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f64()?;
    let a = stack.pop_f64()?;
    stack.push_i32(if a <= b { 1 } else { 0 });
    Ok(())
}

/// f64.ge - Test a >= b
pub fn f64_ge(stack: &mut Stack) -> Result<(), Trap> {
    let b = stack.pop_f64()?;
    let a = stack.pop_f64()?;
    stack.push_i32(if a >= b { 1 } else { 0 });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i32_eqz() {
        let mut stack = Stack::new();
        stack.push_i32(0);
        i32_eqz(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);

        stack.push_i32(-1);
        i32_eqz(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 0);
    }

    #[test]
    fn test_i32_signed_vs_unsigned_ordering() {
        // -1 < 1 signed, but 0xFFFFFFFF > 1 unsigned
        let mut stack = Stack::new();
        stack.push_i32(-1);
        stack.push_i32(1);
        i32_lt_s(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);

        stack.push_i32(-1);
        stack.push_i32(1);
        i32_lt_u(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 0);

        stack.push_i32(-1);
        stack.push_i32(1);
        i32_gt_u(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);
    }

    #[test]
    fn test_i64_comparisons() {
        let mut stack = Stack::new();
        stack.push_i64(0);
        i64_eqz(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);

        stack.push_i64(i64::MIN);
        stack.push_i64(i64::MAX);
        i64_lt_s(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);

        // As unsigned, the sign bit puts MIN above MAX
        stack.push_i64(i64::MIN);
        stack.push_i64(i64::MAX);
        i64_ge_u(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);
    }

    #[test]
    fn test_float_nan_compares_false() {
        let mut stack = Stack::new();
        stack.push_f32(f32::NAN);
        stack.push_f32(f32::NAN);
        f32_eq(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 0);

        stack.push_f32(f32::NAN);
        stack.push_f32(1.0);
        f32_lt(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 0);

        stack.push_f64(f64::NAN);
        stack.push_f64(f64::NAN);
        f64_ne(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);
    }

    #[test]
    fn test_float_ordering() {
        let mut stack = Stack::new();
        stack.push_f64(1.0);
        stack.push_f64(2.0);
        f64_lt(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);

        // -0.0 == +0.0 under IEEE comparison
        stack.push_f32(-0.0);
        stack.push_f32(0.0);
        f32_eq(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);

        stack.push_f64(f64::NEG_INFINITY);
        stack.push_f64(f64::INFINITY);
        f64_le(&mut stack).unwrap();
        assert_eq!(stack.pop_i32().unwrap(), 1);
    }
}
