//! PLA: the CPU-port latch at $00/$01 and the bank-enable logic it drives.
//!
//! $00 is the data-direction register, $01 the data port. Three of its
//! bits — LORAM, HIRAM, CHAREN — are fed to [`Pla::enables`], whose result
//! the owning machine applies to the bus by enabling/disabling the BASIC,
//! KERNAL, character-ROM, and I/O-multiplex overlay devices. Bits 6 and 7
//! of the data port are not physically driven on a stock 6510 and instead
//! exhibit a capacitor-style fall-off from their last-written value back to
//!0 after roughly 350,000 PHI2 cycles; this detail outlives its literal
//! necessity for the bank-switch table but keeps reads of $01 on real
//! software's probe sequences honest.

use crate::c64_emu::bus::Device;
use crate::c64_emu::clock::Cycle;
use crate::error::Fault;

const FALL_OFF_CYCLES: Cycle = 350_000;

struct DataBit {
    set_until: Cycle,
    falling: bool,
    value: u8,
    mask: u8,
}

impl DataBit {
    fn new(bit: u8) -> Self {
        Self {
            set_until: 0,
            falling: false,
            value: 0,
            mask: 1 << bit,
        }
    }
    fn reset(&mut self) {
        self.falling = false;
        self.value = 0;
    }
    fn read(&mut self, now: Cycle) -> u8 {
        if self.falling && self.set_until < now {
            self.reset();
        }
        self.value
    }
    fn write(&mut self, now: Cycle, value: u8) {
        self.set_until = now + FALL_OFF_CYCLES;
        self.value = value & self.mask;
        self.falling = true;
    }
}

/// The three bank-control bits, decoded from the data port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BankEnables {
    pub basic: bool,
    pub kernal: bool,
    pub chargen: bool,
    pub io: bool,
}

pub struct Pla {
    dir: u8,
    data: u8,
    bit6: DataBit,
    bit7: DataBit,
}

impl Pla {
    pub fn new() -> Self {
        let mut pla = Self {
            dir: 0,
            data: 0x3F,
            bit6: DataBit::new(6),
            bit7: DataBit::new(7),
        };
        pla.reset();
        pla
    }

    pub fn reset(&mut self) {
        self.dir = 0;
        self.data = 0x3F;
        self.bit6.reset();
        self.bit7.reset();
    }

    fn loram(&self) -> bool {
        self.data & 0x01 != 0
    }
    fn hiram(&self) -> bool {
        self.data & 0x02 != 0
    }
    fn charen(&self) -> bool {
        self.data & 0x04 != 0
    }

    /// Recompute which of the four overlay regions should be enabled on
    /// the bus, per the documented boolean table.
    pub fn enables(&self) -> BankEnables {
        let (loram, hiram, charen) = (self.loram(), self.hiram(), self.charen());
        BankEnables {
            basic: loram && hiram,
            kernal: hiram,
            chargen: (loram || hiram) && !charen,
            io: (loram || hiram) && charen,
        }
    }

    pub fn read_port0(&self) -> u8 {
        self.dir
    }

    pub fn read_port1(&mut self, now: Cycle) -> u8 {
        // Bit 4 (cassette sense) is excluded from the generic input pull-up:
        // no datasette device is wired (see DESIGN.md §9(d)), so it always
        // reads 0 rather than floating high the way an unconnected input
        // normally would.
        let mut value = (self.data | !self.dir) & 0x07;
        if self.dir & 0x40 == 0 {
            value &= !0x40;
            value |= self.bit6.read(now);
        }
        if self.dir & 0x80 == 0 {
            value &= !0x80;
            value |= self.bit7.read(now);
        }
        value
    }

    pub fn write_port0(&mut self, now: Cycle, value: u8) {
        if self.dir == value {
            return;
        }
        if self.dir & 0x40 != 0 && value & 0x40 == 0 {
            self.bit6.write(now, self.data);
        }
        if self.dir & 0x80 != 0 && value & 0x80 == 0 {
            self.bit7.write(now, self.data);
        }
        self.dir = value;
    }

    pub fn write_port1(&mut self, now: Cycle, value: u8) {
        if self.dir & 0x40 != 0 {
            self.bit6.write(now, value);
        }
        if self.dir & 0x80 != 0 {
            self.bit7.write(now, value);
        }
        self.data = value;
    }
}

impl Default for Pla {
    fn default() -> Self {
        Self::new()
    }
}

/// Exposes the PLA at addresses $0000/$0001 as a bus device. The machine
/// also consults [`Pla::enables`] directly (not through this trait) right
/// after every write, since toggling other devices' enabled flags is the
/// bus's job, not this device's.
pub struct PlaZeroPage {
    pub pla: Pla,
    now: Cycle,
}

impl PlaZeroPage {
    pub fn new() -> Self {
        Self {
            pla: Pla::new(),
            now: 0,
        }
    }

    pub fn set_time(&mut self, now: Cycle) {
        self.now = now;
    }
}

impl Default for PlaZeroPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for PlaZeroPage {
    fn reset(&mut self) {
        self.pla.reset();
    }

    fn try_read(&mut self, address: u16) -> Option<u8> {
        match address {
            0x0000 => Some(self.pla.read_port0()),
            0x0001 => Some(self.pla.read_port1(self.now)),
            _ => None,
        }
    }

    fn write(&mut self, address: u16, value: u8) -> Option<Fault> {
        match address {
            0x0000 => {
                self.pla.write_port0(self.now, value);
                None
            }
            0x0001 => {
                self.pla.write_port1(self.now, value);
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_defaults_enable_basic_kernal_and_io() {
        let pla = Pla::new();
        let e = pla.enables();
        assert!(e.basic && e.kernal && e.io && !e.chargen);
    }

    #[test]
    fn clearing_loram_disables_basic_but_keeps_kernal() {
        let mut pla = Pla::new();
        pla.write_port0(0, 0xFF); // DDR all-output
        pla.write_port1(0, 0b0000_0110); // loram=0, hiram=1, charen=1
        let e = pla.enables();
        assert!(!e.basic);
        assert!(e.kernal);
        assert!(e.io);
    }

    #[test]
    fn charen_clear_with_loram_or_hiram_selects_character_rom() {
        let mut pla = Pla::new();
        pla.write_port0(0, 0xFF);
        pla.write_port1(0, 0b0000_0011); // loram=1 hiram=1 charen=0
        let e = pla.enables();
        assert!(e.chargen);
        assert!(!e.io);
    }
}
