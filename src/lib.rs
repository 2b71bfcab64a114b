//! What the compiler needs to know about the reef runtime: which symbols it
//! exports, their C signatures, and which target the runtime was built for.
//!
//! The runtime itself lives in `reef_core`.

pub mod abi;
pub mod error;
pub mod manifest;

pub use abi::{AbiType, Declaration, Effect, RuntimeFunction, RuntimeFunctions, Signature};
pub use error::ManifestError;
pub use manifest::Manifest;
