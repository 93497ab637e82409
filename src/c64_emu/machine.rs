//! The machine: wires the bus, clock, CPU, PLA, and the I/O multiplex
//! together into one runnable Commodore 64.
//!
//! CIA2-port/VIC-bank and CIA1-port/keyboard wiring already live one level
//! down in [`crate::c64_emu::multiplex`]; this module's own job is the PLA
//! bank-enable recomputation, the per-access clock tick, and the slice/
//! hotkey surface the CLI host drives.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::c64_emu::banks::ram::RamDevice;
use crate::c64_emu::banks::rom;
use crate::c64_emu::bus::{Bus, Device, DeviceHandle};
use crate::c64_emu::clock::Clock;
use crate::c64_emu::cpu::disasm::format_history;
use crate::c64_emu::cpu::{Cpu, CpuMemory, HistoryEntry};
use crate::c64_emu::injector::{basic_pointer_pokes, run_command_pokes, Injector, ProgramImage};
use crate::c64_emu::multiplex::Multiplex;
use crate::c64_emu::pla::PlaZeroPage;
use crate::c64_emu::roms::RomSet;
use crate::error::{Fault, FaultSink, InitError};

struct Overlays {
    basic: DeviceHandle,
    kernal: DeviceHandle,
    chargen: DeviceHandle,
    ram: DeviceHandle,
}

/// Everything a run slice handed back to the host: how far it actually
/// got, what faults were raised along the way, and whether it stopped
/// early because the CPU jammed.
pub struct SliceReport {
    pub cycles_run: u32,
    pub faults: Vec<Fault>,
    pub halted: bool,
}

pub struct Machine {
    bus: Bus,
    pla: PlaZeroPage,
    multiplex: Multiplex,
    clock: Clock,
    cpu: Cpu,
    overlays: Overlays,
    injector: Injector,
    host_nmi_request: bool,
}

/// Borrows exactly the fields a CPU bus access needs, for the lifetime of
/// one [`Cpu::step`] call. Device faults raised while this is alive are
/// buffered locally (not funneled through a shared [`FaultSink`]) so that
/// `Access` never needs to borrow the same sink `step` itself is writing
/// diagnostic faults into.
struct Access<'a> {
    bus: &'a mut Bus,
    pla: &'a mut PlaZeroPage,
    multiplex: &'a mut Multiplex,
    clock: &'a mut Clock,
    overlays: &'a Overlays,
    device_faults: Vec<Fault>,
}

impl<'a> Access<'a> {
    fn sync_overlays(&mut self) {
        let enables = self.pla.pla.enables();
        self.bus.set_enabled(self.overlays.basic, enables.basic);
        self.bus.set_enabled(self.overlays.kernal, enables.kernal);
        self.bus.set_enabled(self.overlays.chargen, enables.chargen);
    }
}

impl<'a> CpuMemory for Access<'a> {
    fn read(&mut self, addr: u16) -> u8 {
        self.clock.wait_cycle();
        self.multiplex.tick();
        self.pla.set_time(self.clock.now());
        match addr {
            0x0000 | 0x0001 => self.pla.try_read(addr).unwrap_or(0),
            0xD000..=0xDFFF if self.pla.pla.enables().io => {
                self.multiplex.try_read(addr).unwrap_or(0)
            }
            _ => self.bus.read(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.clock.wait_cycle();
        self.multiplex.tick();
        self.pla.set_time(self.clock.now());
        let fault = match addr {
            0x0000 | 0x0001 => {
                let f = self.pla.write(addr, value);
                self.sync_overlays();
                f
            }
            0xD000..=0xDFFF if self.pla.pla.enables().io => self.multiplex.write(addr, value),
            _ => self.bus.write(addr, value),
        };
        if let Some(fault) = fault {
            self.device_faults.push(fault);
        }
    }
}

impl Machine {
    /// Build a machine from already-loaded ROM images, registering the
    /// BASIC/KERNAL/character-ROM overlays and RAM on the bus in the PLA's
    /// priority order: overlays first (so they can occlude reads), RAM
    /// last as the catch-all every address eventually falls through to.
    pub fn new(roms: RomSet, programs: Vec<ProgramImage>) -> Self {
        let mut bus = Bus::new();
        let pla = PlaZeroPage::new();
        let enables = pla.pla.enables();

        let basic = bus.register(Box::new(rom::basic(roms.basic, true)), enables.basic);
        let kernal = bus.register(Box::new(rom::kernal(roms.kernal, true)), enables.kernal);
        let chargen = bus.register(Box::new(rom::chargen(roms.chargen, true)), enables.chargen);
        let ram = bus.register(Box::new(RamDevice::new()), true);

        Self {
            bus,
            pla,
            multiplex: Multiplex::new(),
            clock: Clock::new(),
            cpu: Cpu::new(),
            overlays: Overlays { basic, kernal, chargen, ram },
            injector: Injector::new(programs),
            host_nmi_request: false,
        }
    }

    /// Build a machine with a minimal built-in ROM stub: all zeroes except
    /// a reset vector at $FFFC/$FFFD pointing at $E000, where a single RTS
    /// sits. Lets the core boot far enough to run the functional-test
    /// harness or accept injected programs with no KERNAL/BASIC image on
    /// disk.
    pub fn new_with_stub_roms(programs: Vec<ProgramImage>) -> Self {
        let mut kernal = vec![0u8; rom::KERNAL_SIZE];
        kernal[0] = 0x60; // RTS at $E000
        kernal[rom::KERNAL_SIZE - 4] = 0x00; // reset vector low byte -> $E000
        kernal[rom::KERNAL_SIZE - 3] = 0xE0; // reset vector high byte
        let basic = vec![0u8; rom::BASIC_SIZE];
        let chargen = vec![0u8; rom::CHARGEN_SIZE];
        Self::new(
            RomSet {
                kernal,
                basic,
                chargen,
            },
            programs,
        )
    }

    /// Load ROM images from disk (via `rom_dir` if given, else the usual
    /// search path), falling back to [`Machine::new_with_stub_roms`] with a
    /// warning when none are found, then reset.
    pub fn boot(rom_dir: Option<&Path>, programs: Vec<ProgramImage>) -> Result<Self, InitError> {
        let roms = match rom_dir {
            Some(dir) => RomSet::load_from(dir),
            None => RomSet::load(),
        };
        let mut machine = match roms {
            Ok(roms) => {
                info!("loaded KERNAL/BASIC/CHARGEN ROM images");
                Self::new(roms, programs)
            }
            Err(err) => {
                warn!("no ROM images found ({err}); booting with a minimal stub ROM");
                Self::new_with_stub_roms(programs)
            }
        };
        machine.reset();
        Ok(machine)
    }

    pub fn reset(&mut self) {
        self.bus.reset();
        self.pla.reset();
        self.multiplex.reset();
        self.clock.reset();
        let enables = self.pla.pla.enables();
        self.bus.set_enabled(self.overlays.basic, enables.basic);
        self.bus.set_enabled(self.overlays.kernal, enables.kernal);
        self.bus.set_enabled(self.overlays.chargen, enables.chargen);

        let mut access = Access {
            bus: &mut self.bus,
            pla: &mut self.pla,
            multiplex: &mut self.multiplex,
            clock: &mut self.clock,
            overlays: &self.overlays,
            device_faults: Vec::new(),
        };
        self.cpu.reset(&mut access);
        info!("machine reset");
    }

    /// Run until `budget` cycles have elapsed, or the CPU jams/faults,
    /// whichever comes first. Interrupt lines are resampled from the
    /// multiplex's sustained levels before every instruction; a host-raised
    /// NMI request ([`Machine::raise_nmi`]) is folded in as a one-cycle
    /// pulse so it produces exactly one edge.
    pub fn run_slice(&mut self, budget: u32) -> SliceReport {
        let mut faults = FaultSink::new();
        let mut cycles_run = 0u32;
        let mut halted = false;

        while cycles_run < budget {
            self.cpu.irq_line = self.multiplex.irq_asserted();
            self.cpu.nmi_line = self.multiplex.nmi_asserted() || std::mem::take(&mut self.host_nmi_request);

            let mut access = Access {
                bus: &mut self.bus,
                pla: &mut self.pla,
                multiplex: &mut self.multiplex,
                clock: &mut self.clock,
                overlays: &self.overlays,
                device_faults: Vec::new(),
            };
            let outcome = self.cpu.step(&mut access, &mut faults);
            for fault in access.device_faults.drain(..) {
                faults.report(fault);
            }

            match outcome {
                Some(cycles) => cycles_run += cycles,
                None => {
                    halted = true;
                    break;
                }
            }
        }

        SliceReport {
            cycles_run,
            faults: faults.drain(),
            halted,
        }
    }

    /// RESTORE-key style hotkey: request an NMI, taken at the start of the
    /// next instruction.
    pub fn raise_nmi(&mut self) {
        self.host_nmi_request = true;
    }

    pub fn add_read_breakpoint(&mut self, addr: u16) {
        self.cpu.breakpoints_read.push(addr);
    }

    pub fn add_write_breakpoint(&mut self, addr: u16) {
        self.cpu.breakpoints_write.push(addr);
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.cpu.history()
    }

    pub fn dump_history(&self) -> String {
        format_history(&self.cpu.history())
    }

    /// Write every byte of RAM to `path`, exactly as it currently sits
    /// behind the bus (shadowed-by-ROM bytes are dumped too, since this
    /// reads the RAM device directly rather than going through the bus).
    pub fn dump_ram(&mut self, path: &Path) -> std::io::Result<()> {
        let mut bytes = Vec::with_capacity(0x1_0000);
        for addr in 0u32..=0xFFFF {
            let byte = self
                .bus
                .device_mut(self.overlays.ram)
                .try_read(addr as u16)
                .unwrap_or(0);
            bytes.push(byte);
        }
        fs::write(path, &bytes)
    }

    /// Copy the next program in the round-robin list into RAM, prime
    /// BASIC's pointers past it, and queue `RUN` in the keyboard buffer.
    /// Returns `false` if no programs were ever given to the machine.
    pub fn inject_next(&mut self) -> bool {
        let Some(program) = self.injector.peek() else {
            return false;
        };
        let load = program.load_address;
        let end = program.end_address();
        let data = program.data.clone();

        for (i, byte) in data.iter().enumerate() {
            self.poke_ram(load.wrapping_add(i as u16), *byte);
        }
        for (addr, byte) in basic_pointer_pokes(end) {
            self.poke_ram(addr, byte);
        }
        for (addr, byte) in run_command_pokes() {
            self.poke_ram(addr, byte);
        }

        self.injector.advance();
        info!("injected program at ${load:04X}, {} bytes", data.len());
        true
    }

    fn poke_ram(&mut self, addr: u16, value: u8) {
        self.bus.device_mut(self.overlays.ram).write(addr, value);
    }

    /// Direct CPU memory access for test/diagnostic callers that need a
    /// single-instance flat-bus `CpuMemory` view without a whole run slice
    /// (the functional-test harness builds its own, simpler bus instead;
    /// this exists for completeness of the board-level wiring).
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_machine() -> Machine {
        Machine::new_with_stub_roms(Vec::new())
    }

    #[test]
    fn reset_loads_pc_from_the_stub_kernal_vector() {
        let mut machine = stub_machine();
        machine.reset();
        assert_eq!(machine.cpu().pc, 0xE000);
    }

    #[test]
    fn pla_bank_switch_toggles_basic_rom_visibility() {
        let mut machine = Machine::new(
            RomSet {
                kernal: vec![0u8; rom::KERNAL_SIZE],
                basic: {
                    let mut basic = vec![0u8; rom::BASIC_SIZE];
                    basic[0] = 0xAA;
                    basic
                },
                chargen: vec![0u8; rom::CHARGEN_SIZE],
            },
            Vec::new(),
        );
        machine.reset();
        // Reset default: LORAM=HIRAM=CHAREN=1 -> BASIC visible at $A000.
        let mut access = Access {
            bus: &mut machine.bus,
            pla: &mut machine.pla,
            multiplex: &mut machine.multiplex,
            clock: &mut machine.clock,
            overlays: &machine.overlays,
            device_faults: Vec::new(),
        };
        assert_eq!(access.read(0xA000), 0xAA);
        access.write(0x0001, 0x36); // LORAM=0, HIRAM=1, CHAREN=1 -> BASIC off
        assert_eq!(access.read(0xA000), 0x00);
    }

    #[test]
    fn injecting_with_an_empty_program_list_reports_false() {
        let mut machine = stub_machine();
        assert!(!machine.inject_next());
    }

    #[test]
    fn injecting_a_program_primes_the_run_keyboard_buffer() {
        let mut machine = Machine::new(
            RomSet {
                kernal: vec![0u8; rom::KERNAL_SIZE],
                basic: vec![0u8; rom::BASIC_SIZE],
                chargen: vec![0u8; rom::CHARGEN_SIZE],
            },
            vec![ProgramImage {
                load_address: 0x0801,
                data: vec![0x0B, 0x08, 0x0A, 0x00],
            }],
        );
        machine.reset();
        assert!(machine.inject_next());
        let mut access = Access {
            bus: &mut machine.bus,
            pla: &mut machine.pla,
            multiplex: &mut machine.multiplex,
            clock: &mut machine.clock,
            overlays: &machine.overlays,
            device_faults: Vec::new(),
        };
        assert_eq!(access.read(0x0801), 0x0B);
        assert_eq!(access.read(0x0277), b'R');
        assert_eq!(access.read(0x00C6), 4);
    }
}
