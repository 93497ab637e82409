//! History formatting for debug output.
//!
//! Deliberately does not re-read memory for operand bytes: by the time a
//! [`HistoryEntry`] is inspected (typically from a hotkey dump, well after
//! the instruction ran), re-reading the operand address could re-trigger
//! read side effects (a CIA ICR clear-on-read, a VIC-II latch) that the
//! original execution already consumed once. Mnemonic-only output is a
//! deliberately smaller feature than a full disassembly view, trading
//! completeness for never perturbing machine state from a debug command.

use super::HistoryEntry;

/// Three-letter mnemonic for every opcode byte, independent of addressing
/// mode (disambiguating JAM/undefined opcodes from their neighbors isn't
/// useful here; they all show the same placeholder).
fn mnemonic(opcode: u8) -> &'static str {
    match opcode {
        0x00 => "BRK", 0x40 => "RTI", 0x60 => "RTS",
        0x08 => "PHP", 0x28 => "PLP", 0x48 => "PHA", 0x68 => "PLA",
        0x18 => "CLC", 0x38 => "SEC", 0x58 => "CLI", 0x78 => "SEI",
        0xB8 => "CLV", 0xD8 => "CLD", 0xF8 => "SED",
        0xAA => "TAX", 0xA8 => "TAY", 0x8A => "TXA", 0x98 => "TYA",
        0x9A => "TXS", 0xBA => "TSX",
        0xE8 => "INX", 0xC8 => "INY", 0xCA => "DEX", 0x88 => "DEY",
        0xEA => "NOP",
        0x4C | 0x6C => "JMP",
        0x20 => "JSR",
        0x02 | 0x12 | 0x22 | 0x32 | 0x42 | 0x52 | 0x62 | 0x72 | 0x92 | 0xB2 | 0xD2 | 0xF2 => "JAM",

        0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => "ORA",
        0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => "AND",
        0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => "EOR",
        0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => "ADC",
        0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 => "SBC",
        0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => "CMP",
        0xE0 | 0xE4 | 0xEC => "CPX",
        0xC0 | 0xC4 | 0xCC => "CPY",
        0x24 | 0x2C => "BIT",

        0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => "LDA",
        0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => "LDX",
        0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => "LDY",
        0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => "STA",
        0x86 | 0x96 | 0x8E => "STX",
        0x84 | 0x94 | 0x8C => "STY",

        0x0A | 0x06 | 0x16 | 0x0E | 0x1E => "ASL",
        0x4A | 0x46 | 0x56 | 0x4E | 0x5E => "LSR",
        0x2A | 0x26 | 0x36 | 0x2E | 0x3E => "ROL",
        0x6A | 0x66 | 0x76 | 0x6E | 0x7E => "ROR",
        0xE6 | 0xF6 | 0xEE | 0xFE => "INC",
        0xC6 | 0xD6 | 0xCE | 0xDE => "DEC",

        0x10 => "BPL", 0x30 => "BMI", 0x50 => "BVC", 0x70 => "BVS",
        0x90 => "BCC", 0xB0 => "BCS", 0xD0 => "BNE", 0xF0 => "BEQ",

        _ => "???",
    }
}

/// Render history as a sequence of `"$PPPP  MNE"` lines, oldest first.
pub fn format_history(history: &[HistoryEntry]) -> String {
    history
        .iter()
        .map(|entry| format!("${:04X}  {}", entry.pc, mnemonic(entry.opcode)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_opcodes_by_mnemonic() {
        let history = [
            HistoryEntry { pc: 0x0400, opcode: 0xA9 },
            HistoryEntry { pc: 0x0402, opcode: 0x00 },
        ];
        let rendered = format_history(&history);
        assert_eq!(rendered, "$0400  LDA\n$0402  BRK");
    }

    #[test]
    fn unknown_opcodes_render_as_placeholder() {
        assert_eq!(mnemonic(0x0B), "???");
    }

    #[test]
    fn jam_opcodes_render_distinctly() {
        assert_eq!(mnemonic(0x02), "JAM");
    }
}
