//! Runtime support linked into every program the reef compiler produces.
//!
//! Generated code only ever calls the unmangled functions in [`ffi`]. The rest
//! of the crate is the implementation behind them, kept generic over the
//! output so it can be driven without touching the process stdout.

pub mod alloc;
pub mod ffi;
pub mod int;
pub mod sink;
pub mod string;

pub use int::{write_decimal, RuntimeInt};
pub use sink::{ByteSink, StdoutSink};
pub use string::StrView;
