//! `.prg` and `.t64` program file parsing.
//!
//! Both parsers return the injector's [`ProgramImage`] shape (load address
//! + byte vector) so a loaded file and a literal, hard-coded test program
//! look identical to everything downstream of the parser.

use std::path::Path;

use crate::c64_emu::injector::ProgramImage;
use crate::error::InitError;

/// End address that marks a known-buggy `.t64` directory entry (some early
/// authoring tools wrote this sentinel instead of the real end address);
/// such entries are rejected rather than loaded with a bogus length.
const T64_KNOWN_BUG_END: u16 = 0xC3C6;

pub fn load_prg(path: &Path) -> Result<ProgramImage, InitError> {
    let bytes = std::fs::read(path)?;
    parse_prg(&bytes, path)
}

fn parse_prg(bytes: &[u8], path: &Path) -> Result<ProgramImage, InitError> {
    if bytes.len() < 2 {
        return Err(InitError::BadArgs(format!(
            "{}: too short to be a .prg file",
            path.display()
        )));
    }
    let load_address = u16::from_le_bytes([bytes[0], bytes[1]]);
    Ok(ProgramImage {
        load_address,
        data: bytes[2..].to_vec(),
    })
}

pub fn load_t64(path: &Path, entry_index: usize) -> Result<ProgramImage, InitError> {
    let bytes = std::fs::read(path)?;
    parse_t64(&bytes, entry_index, path)
}

fn parse_t64(bytes: &[u8], entry_index: usize, path: &Path) -> Result<ProgramImage, InitError> {
    const SIGNATURE: &[u8] = b"C64S";
    /// 32-byte signature block followed by a 32-byte main header; the
    /// directory entries start only after both.
    const SIGNATURE_LEN: usize = 32;
    const MAIN_HEADER_LEN: usize = 32;
    const DIRECTORY_START: usize = SIGNATURE_LEN + MAIN_HEADER_LEN;
    const ENTRY_LEN: usize = 32;

    if bytes.len() < DIRECTORY_START || &bytes[0..4] != SIGNATURE {
        return Err(InitError::BadArgs(format!(
            "{}: not a .t64 archive (bad signature)",
            path.display()
        )));
    }

    let max_entries = u16::from_le_bytes([bytes[0x22], bytes[0x23]]) as usize;
    if entry_index >= max_entries {
        return Err(InitError::BadArgs(format!(
            "{}: entry {entry_index} out of range (max_entries={max_entries})",
            path.display()
        )));
    }

    let entry_base = DIRECTORY_START + entry_index * ENTRY_LEN;
    let entry = bytes.get(entry_base..entry_base + ENTRY_LEN).ok_or_else(|| {
        InitError::BadArgs(format!(
            "{}: truncated directory entry {entry_index}",
            path.display()
        ))
    })?;

    let type_c64s = entry[0];
    let load = u16::from_le_bytes([entry[2], entry[3]]);
    let end = u16::from_le_bytes([entry[4], entry[5]]);
    let offset = u32::from_le_bytes([entry[8], entry[9], entry[10], entry[11]]) as usize;

    if type_c64s != 1 {
        return Err(InitError::BadArgs(format!(
            "{}: entry {entry_index} is not a usable PRG entry (type_c64s={type_c64s})",
            path.display()
        )));
    }
    if end == T64_KNOWN_BUG_END {
        return Err(InitError::BadArgs(format!(
            "{}: entry {entry_index} has the known end=0xC3C6 bug marker",
            path.display()
        )));
    }

    let len = end.wrapping_sub(load) as usize;
    let data = bytes.get(offset..offset + len).ok_or_else(|| {
        InitError::BadArgs(format!(
            "{}: entry {entry_index} data runs past end of file",
            path.display()
        ))
    })?;

    Ok(ProgramImage {
        load_address: load,
        data: data.to_vec(),
    })
}

/// Load a program by file extension (`.prg` directly; `.t64` as its first
/// usable entry).
pub fn load_program(path: &Path) -> Result<ProgramImage, InitError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("prg") => load_prg(path),
        Some(ext) if ext.eq_ignore_ascii_case("t64") => load_t64(path, 0),
        _ => Err(InitError::BadArgs(format!(
            "{}: unrecognized program file extension",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dummy_path() -> PathBuf {
        PathBuf::from("test.prg")
    }

    #[test]
    fn prg_load_address_is_little_endian() {
        let bytes = [0x01, 0x08, 0xA9, 0x00];
        let image = parse_prg(&bytes, &dummy_path()).unwrap();
        assert_eq!(image.load_address, 0x0801);
        assert_eq!(image.data, vec![0xA9, 0x00]);
    }

    #[test]
    fn prg_shorter_than_header_is_rejected() {
        assert!(parse_prg(&[0x01], &dummy_path()).is_err());
    }

    /// 32-byte signature block + 32-byte main header, matching the real
    /// on-disk layout (directory entries start only after both).
    fn build_t64(entries: &[(u8, u16, u16, u32)], data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; 64];
        out[0..4].copy_from_slice(b"C64S");
        out[0x22..0x24].copy_from_slice(&(entries.len() as u16).to_le_bytes());
        for &(type_c64s, load, end, offset) in entries {
            let mut entry = vec![0u8; 32];
            entry[0] = type_c64s;
            entry[2..4].copy_from_slice(&load.to_le_bytes());
            entry[4..6].copy_from_slice(&end.to_le_bytes());
            entry[8..12].copy_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&entry);
        }
        out.extend_from_slice(data);
        out
    }

    #[test]
    fn t64_reads_first_usable_entry() {
        let payload = [0xA9u8, 0x42, 0x60];
        let data_offset = 64 + 32;
        let archive = build_t64(
            &[(1, 0x0801, 0x0801 + payload.len() as u16, data_offset as u32)],
            &payload,
        );
        let image = parse_t64(&archive, 0, &dummy_path()).unwrap();
        assert_eq!(image.load_address, 0x0801);
        assert_eq!(image.data, payload);
    }

    #[test]
    fn t64_rejects_the_known_bug_end_marker() {
        let archive = build_t64(&[(1, 0x0801, T64_KNOWN_BUG_END, 96)], &[]);
        assert!(parse_t64(&archive, 0, &dummy_path()).is_err());
    }

    #[test]
    fn t64_rejects_non_c64s_entry_types() {
        let archive = build_t64(&[(0, 0x0801, 0x0802, 96)], &[0x00]);
        assert!(parse_t64(&archive, 0, &dummy_path()).is_err());
    }
}
