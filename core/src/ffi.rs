//! Unmangled entry points called by generated code.
//!
//! None of these unwind. Output errors have no channel back to the caller,
//! so they are dropped here.

use std::{ffi::c_void, ptr};

use crate::{alloc, int::write_decimal, sink::StdoutSink, string};

/// # Safety
///
/// `view` must describe `length` readable bytes, or have a null `start`.
#[no_mangle]
pub unsafe extern "C" fn print_string(view: string::StrView) {
    let mut out = StdoutSink::lock();
    let _ = unsafe { string::write_str_view(view, &mut out) };
}

macro_rules! print_int_exports {
    ($($name:ident: $ty:ty),* $(,)?) => {$(
        #[doc = concat!("Writes a `", stringify!($ty), "` to standard output in decimal.")]
        #[no_mangle]
        pub extern "C" fn $name(num: $ty) {
            let _ = write_decimal(num, &mut StdoutSink::lock());
        }
    )*};
}

print_int_exports! {
    print_i8: i8,
    print_i16: i16,
    print_i32: i32,
    print_i64: i64,
    print_u8: u8,
    print_u16: u16,
    print_u32: u32,
    print_u64: u64,
}

/// Returns a fresh `malloc` block of `size` bytes, or null.
#[no_mangle]
pub extern "C" fn allocate(size: usize) -> *mut c_void {
    alloc::allocate(size).map_or(ptr::null_mut(), |block| block.as_ptr())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocate_sentinel_is_null() {
        assert!(allocate(usize::MAX).is_null());

        let block = allocate(16);
        assert!(!block.is_null());
        unsafe { libc::free(block) };
    }

    #[test]
    fn allocate_zero() {
        // malloc(0) may hand back null or a unique block; either must be safe to free
        let block = allocate(0);
        unsafe { libc::free(block) };
    }
}
