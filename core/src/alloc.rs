use std::{ffi::c_void, ptr::NonNull};

/// Requests `size` bytes from the C allocator.
///
/// The block is uninitialized and aligned however `malloc` aligns it. It
/// belongs to the caller from here on and is released with `free`; the
/// runtime keeps no record of it. `None` when the allocator refuses, which
/// `malloc` may also do for a zero-sized request.
pub fn allocate(size: usize) -> Option<NonNull<c_void>> {
    NonNull::new(unsafe { libc::malloc(size) })
}
