//! Memory bank devices.
//!
//! In the C64, the PLA routes CPU accesses to different chips depending on
//! the processor-port bits and the address. [`ram`] supplies the 64 KB
//! backing store that answers whatever no overlay claims; [`rom`] supplies
//! the read-only KERNAL/BASIC/character-generator overlays the PLA enables
//! and disables on top of it.

pub mod ram;
pub mod rom;

pub use ram::RamDevice;
pub use rom::RomOverlay;
