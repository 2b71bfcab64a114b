use std::io;

use crate::sink::ByteSink;

/// Borrowed run of bytes as the compiler lays it out:
/// `struct { size_t length; const char *start; }`.
///
/// The length is authoritative. A NUL inside the run is printed like any other
/// byte and nothing past `length` is read.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct StrView {
    pub length: usize,
    pub start: *const u8,
}

impl StrView {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            length: bytes.len(),
            start: bytes.as_ptr(),
        }
    }

    /// # Safety
    ///
    /// Unless the view is empty or `start` is null, `start` must point to
    /// `length` initialized bytes that stay alive and unmodified for `'a`.
    pub unsafe fn as_bytes<'a>(&self) -> &'a [u8] {
        if self.length == 0 || self.start.is_null() {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.start, self.length) }
    }
}

/// # Safety
///
/// Same contract as [`StrView::as_bytes`].
pub unsafe fn write_str_view<S: ByteSink + ?Sized>(view: StrView, sink: &mut S) -> io::Result<()> {
    sink.put_all(unsafe { view.as_bytes() })
}

#[cfg(test)]
mod test {
    use super::{write_str_view, StrView};

    fn render(view: StrView) -> Vec<u8> {
        let mut out = Vec::new();
        unsafe { write_str_view(view, &mut out) }.unwrap();
        out
    }

    #[test]
    fn stops_at_length() {
        let backing = b"hello, world";
        let view = StrView {
            length: 5,
            start: backing.as_ptr(),
        };
        assert_eq!(render(view), b"hello");
    }

    #[test]
    fn nul_is_data() {
        let backing = b"ab\0cd\0";
        assert_eq!(render(StrView::new(&backing[..5])), b"ab\0cd");
    }

    #[test]
    fn empty_and_null_views() {
        assert!(render(StrView::new(b"")).is_empty());
        let null = StrView {
            length: 3,
            start: std::ptr::null(),
        };
        assert!(render(null).is_empty());
    }

    #[test]
    fn c_layout() {
        assert_eq!(
            std::mem::size_of::<StrView>(),
            2 * std::mem::size_of::<usize>()
        );
        assert_eq!(std::mem::align_of::<StrView>(), std::mem::align_of::<usize>());
    }
}
