//! Runs the CPU core against the Klaus Dormann 6502 functional-test binary.
//!
//! The binary itself is not redistributed with this crate. Point
//! `C64_FUNCTIONAL_TEST_BIN` at a local copy of `6502_functional_test.bin`
//! (load address 0x0000, entry point 0x0400) to exercise it:
//!
//! ```text
//! C64_FUNCTIONAL_TEST_BIN=/path/to/6502_functional_test.bin \
//!     cargo test --test functional_test -- --ignored
//! ```

use std::env;
use std::fs;

use c64_core::c64_emu::cpu::disasm::format_history;
use c64_core::c64_emu::cpu::{Cpu, CpuMemory};
use c64_core::error::FaultSink;

/// PC the test binary jumps to (and loops on) once every sub-test passes.
const SUCCESS_PC: u16 = 0x3469;
/// Entry point documented by the test binary itself.
const START_PC: u16 = 0x0400;
/// Upper bound on instructions so a regression that breaks looping can't
/// hang the test suite; the real program completes in well under this.
const MAX_STEPS: u64 = 100_000_000;

struct FlatBus {
    ram: Vec<u8>,
}

impl CpuMemory for FlatBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }
    fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }
}

#[test]
#[ignore]
fn klaus_dormann_6502_functional_test() {
    let path = match env::var("C64_FUNCTIONAL_TEST_BIN") {
        Ok(path) => path,
        Err(_) => {
            eprintln!("C64_FUNCTIONAL_TEST_BIN not set; skipping");
            return;
        }
    };

    let image = fs::read(&path).unwrap_or_else(|err| panic!("failed to read {path}: {err}"));
    let mut ram = vec![0u8; 0x1_0000];
    ram[..image.len()].copy_from_slice(&image);
    let mut bus = FlatBus { ram };

    let mut cpu = Cpu::new();
    cpu.pc = START_PC;
    cpu.sp = 0xFF;
    let mut faults = FaultSink::new();

    let mut steps = 0u64;
    loop {
        if cpu.pc == SUCCESS_PC {
            break;
        }
        if steps >= MAX_STEPS {
            panic!(
                "functional test did not reach success PC within {MAX_STEPS} steps; last PC=${:04X}\n{}",
                cpu.pc,
                format_history(&cpu.history())
            );
        }
        match cpu.step(&mut bus, &mut faults) {
            Some(_) => steps += 1,
            None => panic!(
                "CPU halted at ${:04X} before reaching success PC ${SUCCESS_PC:04X}\n{}",
                cpu.pc,
                format_history(&cpu.history())
            ),
        }
    }

    assert_eq!(cpu.pc, SUCCESS_PC);
    assert!(
        faults.is_empty(),
        "unexpected faults raised during the functional test: {:?}",
        faults
    );
}
