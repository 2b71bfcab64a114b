//! JSON description of a runtime build, handed to the toolchain so it can
//! declare the functions it calls and refuse to link a foreign runtime.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    abi::{Declaration, RuntimeFunctions},
    error::ManifestError,
};

/// Name of the library generated programs link against.
pub const LIBRARY_NAME: &str = "reef_core";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub library: String,
    pub target: String,
    pub functions: Vec<Declaration>,
}

impl Manifest {
    /// Every function the runtime exports.
    pub fn complete() -> Self {
        let functions = RuntimeFunctions::new();
        functions.declare_all();
        Self::from_functions(&functions)
    }

    /// Only the functions that have been requested from `functions`.
    pub fn from_functions(functions: &RuntimeFunctions) -> Self {
        Self {
            library: LIBRARY_NAME.to_owned(),
            target: current_platform::CURRENT_PLATFORM.to_owned(),
            functions: functions.used().cloned().collect(),
        }
    }

    pub fn find(&self, symbol: &str) -> Option<&Declaration> {
        self.functions.iter().find(|decl| decl.symbol == symbol)
    }

    pub fn check_target(&self) -> Result<(), ManifestError> {
        if self.target == current_platform::CURRENT_PLATFORM {
            return Ok(());
        }
        log::warn!(
            "runtime manifest targets {}, expected {}",
            self.target,
            current_platform::CURRENT_PLATFORM
        );
        Err(ManifestError::TargetMismatch {
            expected: current_platform::CURRENT_PLATFORM.to_owned(),
            found: self.target.clone(),
        })
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), ManifestError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        log::debug!(
            "writing runtime manifest with {} functions to {}",
            self.functions.len(),
            path.display()
        );
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ManifestError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn read_from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        log::debug!("reading runtime manifest from {}", path.display());
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}
