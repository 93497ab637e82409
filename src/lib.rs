//! Commodore 64 emulator core: a cycle-driven 6502 CPU, a multi-device bus
//! with PLA bank switching, CIA timer/port chips, and a VIC-II register
//! bank, plus the file-format parsers and program injector that let a host
//! load and run a `.prg`/`.t64` image.
//!
//! The CLI host that wires this into a runnable binary lives in `main.rs`;
//! this library exists so both the binary and the integration test harness
//! under `tests/` can depend on the same core.

pub mod c64_emu;
pub mod config;
pub mod error;
