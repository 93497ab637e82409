//! I/O multiplex: the composite device behind $D000-$DFFF.
//!
//! When the PLA enables the I/O window, this single bus device claims the
//! whole 4 KB range and routes each 256-byte page to VIC-II, Color RAM,
//! CIA1, CIA2, or an unconnected stub, following the standard C64 mapping.
//! CIA1's ports are additionally wired to the keyboard matrix, and CIA2's
//! port A low two bits select the VIC-II memory bank, both intercepted
//! here rather than inside the CIA model itself, since neither is a
//! property of the chip — it's a property of how this particular board
//! wires it.

use crate::c64_emu::bus::Device;
use crate::c64_emu::cia::interrupt::CiaModel;
use crate::c64_emu::cia::Mos652x;
use crate::c64_emu::keyboard::KeyboardMatrix;
use crate::c64_emu::vic_ii::{ColorRam, VicII};
use crate::error::Fault;

fn page(addr: u16) -> usize {
    ((addr >> 8) & 0x0F) as usize
}

pub struct Multiplex {
    pub vic: VicII,
    pub color_ram: ColorRam,
    pub cia1: Mos652x,
    pub cia2: Mos652x,
    pub keyboard: KeyboardMatrix,
}

impl Multiplex {
    pub fn new() -> Self {
        Self {
            vic: VicII::new(),
            color_ram: ColorRam::new(),
            cia1: Mos652x::new(CiaModel::Mos6526),
            cia2: Mos652x::new(CiaModel::Mos6526),
            keyboard: KeyboardMatrix::new(),
        }
    }

    pub fn reset(&mut self) {
        self.vic.reset();
        self.color_ram.reset();
        self.cia1.reset();
        self.cia2.reset();
        self.keyboard.reset();
        self.sync_vic_bank();
    }

    /// Advance every peripheral behind the multiplex by one PHI2 cycle.
    /// Returns `(irq, nmi)`: whether a new interrupt was asserted on
    /// either line this cycle (CIA1 and the VIC-II raster compare drive
    /// IRQ; CIA2 drives NMI).
    pub fn tick(&mut self) -> (bool, bool) {
        let cia1_irq = matches!(self.cia1.tick(), Some(true));
        let cia2_nmi = matches!(self.cia2.tick(), Some(true));
        let vic_irq = self.vic.tick();
        (cia1_irq || vic_irq, cia2_nmi)
    }

    /// Sustained IRQ level: CIA1's timers/TOD or the VIC-II raster compare.
    pub fn irq_asserted(&self) -> bool {
        self.cia1.interrupt_asserted() || self.vic.irq_asserted()
    }

    /// Sustained NMI level: CIA2's timers/TOD.
    pub fn nmi_asserted(&self) -> bool {
        self.cia2.interrupt_asserted()
    }

    fn sync_vic_bank(&mut self) {
        let ddr_a = self.cia2.regs[2];
        let pa = self.cia2.regs[0] | !ddr_a;
        self.vic.set_memory_base_bank(!pa & 0x03);
    }

    fn cia1_read(&mut self, reg: u8) -> (u8, Option<bool>) {
        match reg {
            1 => {
                let ddr_a = self.cia1.regs[2];
                let strobe = self.cia1.regs[0] | !ddr_a;
                let ddr_b = self.cia1.regs[3];
                let kb = self.keyboard.read_rows_for_column_strobe(strobe);
                let (latch_b, irq) = self.cia1.read(1);
                let merged = (latch_b & ddr_b) | (kb & !ddr_b);
                (merged, irq)
            }
            other => self.cia1.read(other),
        }
    }
}

impl Default for Multiplex {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Multiplex {
    fn reset(&mut self) {
        Multiplex::reset(self);
    }

    fn try_read(&mut self, address: u16) -> Option<u8> {
        if !(0xD000..=0xDFFF).contains(&address) {
            return None;
        }
        let reg = (address & 0xFF) as u8;
        Some(match page(address) {
            0x0..=0x3 => self.vic.read(reg),
            0x8..=0xB => self.color_ram.peek(address),
            0xC => self.cia1_read(reg & 0x0F).0,
            0xD => self.cia2.read(reg & 0x0F).0,
            _ => 0,
        })
    }

    fn write(&mut self, address: u16, value: u8) -> Option<Fault> {
        if !(0xD000..=0xDFFF).contains(&address) {
            return None;
        }
        let reg = (address & 0xFF) as u8;
        match page(address) {
            0x0..=0x3 => return self.vic.write(reg, value).err(),
            0x8..=0xB => self.color_ram.poke(address, value),
            0xC => {
                self.cia1.write(reg & 0x0F, value);
            }
            0xD => {
                self.cia2.write(reg & 0x0F, value);
                if matches!(reg & 0x0F, 0 | 2) {
                    self.sync_vic_bank();
                }
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_the_whole_io_window_when_queried() {
        let mut mux = Multiplex::new();
        assert!(mux.try_read(0xD400).is_some());
        assert!(mux.try_read(0xDE00).is_some());
        assert!(mux.try_read(0xCFFF).is_none());
    }

    #[test]
    fn cia2_porta_write_retargets_vic_memory_bank() {
        let mut mux = Multiplex::new();
        mux.cia2.write(2, 0x03); // DDRA all-output
        mux.write(0xDD00, 0b0000_0011); // PA = 3 -> inverted bank 0
        assert_eq!(mux.vic.vic_base(), 0xC000);
        mux.write(0xDD00, 0b0000_0000); // PA = 0 -> inverted bank 3
        assert_eq!(mux.vic.vic_base(), 0x0000);
    }

    #[test]
    fn keyboard_strobe_through_cia1_reads_pressed_key() {
        let mut mux = Multiplex::new();
        mux.cia1.write(2, 0xFF); // DDRA output (strobe columns)
        mux.cia1.write(3, 0x00); // DDRB input (read rows)
        let (row, col) = KeyboardMatrix::find("SPACE").unwrap();
        mux.keyboard.press(row, col);
        mux.cia1.write(0, !(1 << col)); // strobe only SPACE's column
        let (rows, _) = mux.cia1_read(1);
        assert_eq!(rows & (1 << row), 0);
    }
}
