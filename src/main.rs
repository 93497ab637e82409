//! CLI host: boots a [`Machine`], drives it in bounded run slices, and
//! relays a small set of hotkeys from stdin into the machine's own control
//! surface (raise_nmi, inject_next, dump_history, reset, dump_ram).
//!
//! The core itself is purely logical and does no wall-clock pacing (see
//! `c64_emu::clock`); this binary adds the only pacing and the only
//! stdout/stderr output outside of structured logging.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver};
use log::{error, info, warn};

use c64_core::c64_emu::file_formats::load_program;
use c64_core::c64_emu::injector::ProgramImage;
use c64_core::c64_emu::machine::Machine;
use c64_core::config::Config;
use c64_core::error::InitError;

/// Cycles run per slice before control returns to the host to drain hotkeys.
const SLICE_BUDGET: u32 = 20_000;

enum Hotkey {
    Pause,
    Inject,
    DumpHistory,
    Reset,
    DumpRam,
    Quit,
}

fn parse_hotkey(line: &str) -> Option<Hotkey> {
    match line.trim() {
        "pause" | "p" => Some(Hotkey::Pause),
        "f9" | "inject" => Some(Hotkey::Inject),
        "f10" | "history" => Some(Hotkey::DumpHistory),
        "f11" | "reset" => Some(Hotkey::Reset),
        "f12" | "dump" => Some(Hotkey::DumpRam),
        "q" | "quit" => Some(Hotkey::Quit),
        _ => None,
    }
}

/// Spawn a background thread that reads hotkey names off stdin, one per
/// line, and forwards them over a bounded channel. Keeps the run-slice loop
/// free of blocking I/O.
fn spawn_hotkey_reader() -> Receiver<Hotkey> {
    let (tx, rx) = bounded(8);
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) => break, // EOF
                Ok(_) => {
                    if let Some(key) = parse_hotkey(&line) {
                        if tx.send(key).is_err() {
                            break;
                        }
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

fn load_programs(paths: &[PathBuf]) -> Vec<ProgramImage> {
    let mut programs = Vec::new();
    for path in paths {
        match load_program(path) {
            Ok(image) => {
                info!("loaded program {} at ${:04X}", path.display(), image.load_address);
                programs.push(image);
            }
            Err(err) => warn!("skipping {}: {err}", path.display()),
        }
    }
    programs
}

fn run(config: Config) -> Result<(), InitError> {
    let programs = load_programs(&config.programs);
    let mut machine = Machine::boot(config.rom_dir.as_deref(), programs)?;
    let hotkeys = spawn_hotkey_reader();
    let mut dump_counter = 0u32;

    loop {
        let report = machine.run_slice(SLICE_BUDGET);
        for fault in &report.faults {
            if fault.halts_slice() {
                error!("{fault}");
            } else {
                warn!("{fault}");
            }
        }
        if report.halted {
            error!("CPU halted:\n{}", machine.dump_history());
            return Ok(());
        }

        while let Ok(key) = hotkeys.try_recv() {
            match key {
                Hotkey::Pause => {
                    info!("RESTORE: raising NMI");
                    machine.raise_nmi();
                }
                Hotkey::Inject => {
                    if !machine.inject_next() {
                        warn!("no programs queued to inject");
                    }
                }
                Hotkey::DumpHistory => {
                    println!("{}", machine.dump_history());
                }
                Hotkey::Reset => {
                    info!("resetting machine");
                    machine.reset();
                }
                Hotkey::DumpRam => {
                    let path = PathBuf::from(format!("dump-{dump_counter}.dat"));
                    match machine.dump_ram(&path) {
                        Ok(()) => info!("wrote RAM dump to {}", path.display()),
                        Err(err) => error!("failed to write {}: {err}", path.display()),
                    }
                    dump_counter += 1;
                }
                Hotkey::Quit => return Ok(()),
            }
        }

        thread::sleep(Duration::from_millis(1));
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    info!("zoom={}, {} program(s) queued", config.zoom, config.programs.len());

    if let Err(err) = run(config) {
        error!("{err}");
        std::process::exit(1);
    }
}
