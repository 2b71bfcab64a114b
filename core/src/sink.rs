use std::io::{self, StdoutLock, Write};

/// Destination for runtime output, fed one byte at a time.
pub trait ByteSink {
    fn put(&mut self, byte: u8) -> io::Result<()>;

    fn put_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        bytes.iter().try_for_each(|&byte| self.put(byte))
    }
}

impl ByteSink for Vec<u8> {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.push(byte);
        Ok(())
    }

    fn put_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Locked handle on the process standard output.
///
/// The std handle is line buffered and is only flushed by the Rust runtime
/// when a Rust `main` returns. Generated programs own `main`, so the sink
/// flushes on drop instead.
pub struct StdoutSink {
    out: StdoutLock<'static>,
}

impl StdoutSink {
    pub fn lock() -> Self {
        Self {
            out: io::stdout().lock(),
        }
    }
}

impl ByteSink for StdoutSink {
    fn put(&mut self, byte: u8) -> io::Result<()> {
        self.out.write_all(&[byte])
    }

    fn put_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }
}

impl Drop for StdoutSink {
    fn drop(&mut self) {
        // nowhere to report this
        let _ = self.out.flush();
    }
}
