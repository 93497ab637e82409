//! Program injector: places a program image into RAM and primes BASIC's
//! pointers and keyboard buffer so a subsequent `RUN` picks it up
//! immediately, the way a real C64 loader does after `LOAD` finishes.
//!
//! This module only computes *what* to poke; [`crate::c64_emu::machine`]
//! owns the RAM device and actually performs the pokes, since this module
//! has no reason to know about the bus.

/// Zero-page BASIC pointers primed after a load: start of variables, start
/// of arrays, end of arrays/strings.
const VARTAB: u16 = 0x002D;
const ARYTAB: u16 = 0x002F;
const STREND: u16 = 0x0031;
/// "Old text pointer" (CONT support) and "end of array" shadow, both also
/// primed to the load-end address by real KERNAL LOAD.
const OLDTXT: u16 = 0x003D;
const EAL: u16 = 0x00AE;

/// Keyboard input buffer and its length byte.
const KEYBUF: u16 = 0x0277;
const KEYBUF_LEN: u16 = 0x00C6;

const RUN_COMMAND: &[u8] = b"RUN\r";

pub struct ProgramImage {
    pub load_address: u16,
    pub data: Vec<u8>,
}

impl ProgramImage {
    pub fn end_address(&self) -> u16 {
        self.load_address.wrapping_add(self.data.len() as u16)
    }
}

/// Holds the list of programs a host may inject (e.g. via an F9 hotkey)
/// and a round-robin cursor into it.
pub struct Injector {
    programs: Vec<ProgramImage>,
    next: usize,
}

impl Injector {
    pub fn new(programs: Vec<ProgramImage>) -> Self {
        Self { programs, next: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// The program the next `advance()` will have already served, without
    /// consuming it.
    pub fn peek(&self) -> Option<&ProgramImage> {
        self.programs.get(self.next)
    }

    pub fn advance(&mut self) {
        if !self.programs.is_empty() {
            self.next = (self.next + 1) % self.programs.len();
        }
    }
}

/// The (address, byte) pokes that prime BASIC's variable-table pointers to
/// `end` — everything LOAD normally does after the program bytes
/// themselves are in place.
pub fn basic_pointer_pokes(end: u16) -> Vec<(u16, u8)> {
    let lo = (end & 0xFF) as u8;
    let hi = (end >> 8) as u8;
    vec![
        (VARTAB, lo), (VARTAB + 1, hi),
        (ARYTAB, lo), (ARYTAB + 1, hi),
        (STREND, lo), (STREND + 1, hi),
        (OLDTXT, lo), (OLDTXT + 1, hi),
        (EAL, lo), (EAL + 1, hi),
    ]
}

/// The pokes that place `"RUN\r"` into the keyboard buffer and set its
/// length byte, so the next KERNAL keyboard poll types it for us.
pub fn run_command_pokes() -> Vec<(u16, u8)> {
    let mut pokes: Vec<(u16, u8)> = RUN_COMMAND
        .iter()
        .enumerate()
        .map(|(i, &b)| (KEYBUF + i as u16, b))
        .collect();
    pokes.push((KEYBUF_LEN, RUN_COMMAND.len() as u8));
    pokes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_wraps_after_the_last_program() {
        let mut injector = Injector::new(vec![
            ProgramImage { load_address: 0x0801, data: vec![1] },
            ProgramImage { load_address: 0x1000, data: vec![2] },
        ]);
        assert_eq!(injector.peek().unwrap().load_address, 0x0801);
        injector.advance();
        assert_eq!(injector.peek().unwrap().load_address, 0x1000);
        injector.advance();
        assert_eq!(injector.peek().unwrap().load_address, 0x0801);
    }

    #[test]
    fn basic_pointers_all_point_past_the_loaded_program() {
        let pokes = basic_pointer_pokes(0x1234);
        assert!(pokes.contains(&(VARTAB, 0x34)));
        assert!(pokes.contains(&(VARTAB + 1, 0x12)));
        assert!(pokes.contains(&(EAL, 0x34)));
        assert!(pokes.contains(&(EAL + 1, 0x12)));
    }

    #[test]
    fn run_command_pokes_set_length_and_bytes() {
        let pokes = run_command_pokes();
        assert_eq!(pokes[0], (KEYBUF, b'R'));
        assert_eq!(pokes[3], (KEYBUF + 3, b'\r'));
        assert_eq!(pokes[4], (KEYBUF_LEN, 4));
    }
}
