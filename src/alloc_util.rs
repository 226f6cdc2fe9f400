use alloc::vec::Vec;
use core::alloc::Layout;

use crate::{ErrorCode, WireError};

#[inline]
fn check_reserve_len<T>(len: usize, additional: usize, offset: usize) -> Result<(), WireError> {
    let needed = len
        .checked_add(additional)
        .ok_or_else(|| WireError::new(ErrorCode::LengthOverflow, offset))?;
    Layout::array::<T>(needed).map_err(|_| WireError::new(ErrorCode::LengthOverflow, offset))?;
    Ok(())
}

#[inline]
pub fn try_reserve<T>(v: &mut Vec<T>, additional: usize, offset: usize) -> Result<(), WireError> {
    let needed = v
        .len()
        .checked_add(additional)
        .ok_or_else(|| WireError::new(ErrorCode::LengthOverflow, offset))?;
    if needed <= v.capacity() {
        return Ok(());
    }
    check_reserve_len::<T>(v.len(), additional, offset)?;
    v.try_reserve(additional)
        .map_err(|_| WireError::new(ErrorCode::AllocationFailed, offset))
}

/// Empty vector with room for `cap` elements.
///
/// Decoders pass a capacity already clamped to the remaining input, so a hostile length prefix
/// cannot trigger a huge up-front allocation.
#[inline]
pub fn try_vec_with_capacity<T>(cap: usize, offset: usize) -> Result<Vec<T>, WireError> {
    let mut v: Vec<T> = Vec::new();
    check_reserve_len::<T>(0, cap, offset)?;
    v.try_reserve_exact(cap)
        .map_err(|_| WireError::new(ErrorCode::AllocationFailed, offset))?;
    Ok(v)
}
