//! Typed error/fault surface for the emulator core.
//!
//! Two layers exist on purpose: [`InitError`] covers everything that can go
//! wrong before the machine is running (missing ROM, bad CLI arguments) and
//! is always fatal; [`Fault`] covers runtime conditions the bus and CPU
//! raise while the machine is executing and that the host may choose to log
//! and continue past, or treat as a reason to stop the current run slice.

use std::path::PathBuf;

use thiserror::Error;

/// Failure during machine construction. The CLI host treats any of these as
/// fatal: log at `error` and exit with status 1.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("ROM image not found: {path} ({reason})")]
    RomMissing { path: PathBuf, reason: String },

    #[error("ROM image {path} has wrong size: expected {expected} bytes, got {actual}")]
    RomSize {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("invalid command-line arguments: {0}")]
    BadArgs(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A runtime condition raised by a device or the CPU while the machine is
/// running. Faults are collected by a [`FaultSink`] rather than unwound as
/// Rust errors, since a fault does not necessarily stop execution.
#[derive(Debug, Clone, Error)]
pub enum Fault {
    #[error("write to read-only region at ${address:04X}")]
    RomWrite { address: u16 },

    #[error("unimplemented opcode ${opcode:02X} at ${pc:04X}")]
    UnknownOpcode { pc: u16, opcode: u8 },

    #[error("CPU jammed on opcode ${opcode:02X} at ${pc:04X}")]
    Jam { pc: u16, opcode: u8 },

    #[error("branch/jump at ${pc:04X} targets itself; aborting slice")]
    StuckBranch { pc: u16 },

    #[error("VIC-II mode register combination {mcm}/{bmm}/{ecm} at raster is invalid")]
    InvalidDisplayMode { mcm: bool, bmm: bool, ecm: bool },

    #[error("{0}")]
    Other(String),
}

/// Whether a fault should halt the current run slice (jam-class) or is
/// merely reported and execution continues (recoverable).
impl Fault {
    pub fn halts_slice(&self) -> bool {
        matches!(self, Fault::Jam { .. } | Fault::StuckBranch { .. })
    }
}

/// Collects faults raised during a run slice without unwinding. The CLI host
/// owns one, drains it after each slice, and logs at `warn` (recoverable) or
/// `error` (halting) per entry.
#[derive(Debug, Default)]
pub struct FaultSink {
    faults: Vec<Fault>,
}

impl FaultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    pub fn drain(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn last_halts(&self) -> bool {
        self.faults.last().map(Fault::halts_slice).unwrap_or(false)
    }
}
