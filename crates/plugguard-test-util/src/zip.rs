//! Deterministic store-only (method 0) zip writer.
//!
//! Enough of the format for fixtures: local file headers, a central
//! directory, and an end-of-central-directory record. No compression, no
//! zip64, no timestamps (DOS time fields are zero so archives are
//! byte-for-byte reproducible).

use std::io::Write;
use std::path::Path;

const LOCAL_HEADER_SIG: u32 = 0x0403_4b50;
const CENTRAL_DIR_SIG: u32 = 0x0201_4b50;
const EOCD_SIG: u32 = 0x0605_4b50;

/// Write a zip file at `path` containing `entries` as stored (uncompressed)
/// files, in the given order. Entry names use forward slashes.
pub fn write_store_zip(path: &Path, entries: &[(&str, &[u8])]) -> std::io::Result<()> {
    let mut buf: Vec<u8> = Vec::new();
    let mut central: Vec<u8> = Vec::new();

    for (name, data) in entries {
        let offset = buf.len() as u32;
        let crc = crc32(data);
        let name_bytes = name.as_bytes();
        let size = data.len() as u32;

        // Local file header.
        put_u32(&mut buf, LOCAL_HEADER_SIG);
        put_u16(&mut buf, 20); // version needed
        put_u16(&mut buf, 0); // flags
        put_u16(&mut buf, 0); // method: store
        put_u16(&mut buf, 0); // mod time
        put_u16(&mut buf, 0); // mod date
        put_u32(&mut buf, crc);
        put_u32(&mut buf, size);
        put_u32(&mut buf, size);
        put_u16(&mut buf, name_bytes.len() as u16);
        put_u16(&mut buf, 0); // extra len
        buf.extend_from_slice(name_bytes);
        buf.extend_from_slice(data);

        // Central directory entry.
        put_u32(&mut central, CENTRAL_DIR_SIG);
        put_u16(&mut central, 20); // version made by
        put_u16(&mut central, 20); // version needed
        put_u16(&mut central, 0); // flags
        put_u16(&mut central, 0); // method
        put_u16(&mut central, 0); // mod time
        put_u16(&mut central, 0); // mod date
        put_u32(&mut central, crc);
        put_u32(&mut central, size);
        put_u32(&mut central, size);
        put_u16(&mut central, name_bytes.len() as u16);
        put_u16(&mut central, 0); // extra len
        put_u16(&mut central, 0); // comment len
        put_u16(&mut central, 0); // disk number start
        put_u16(&mut central, 0); // internal attrs
        put_u32(&mut central, 0); // external attrs
        put_u32(&mut central, offset);
        central.extend_from_slice(name_bytes);
    }

    let cd_offset = buf.len() as u32;
    let cd_size = central.len() as u32;
    buf.extend_from_slice(&central);

    // End of central directory.
    put_u32(&mut buf, EOCD_SIG);
    put_u16(&mut buf, 0); // disk number
    put_u16(&mut buf, 0); // central dir disk
    put_u16(&mut buf, entries.len() as u16);
    put_u16(&mut buf, entries.len() as u16);
    put_u32(&mut buf, cd_size);
    put_u32(&mut buf, cd_offset);
    put_u16(&mut buf, 0); // comment len

    let mut file = std::fs::File::create(path)?;
    file.write_all(&buf)?;
    Ok(())
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

/// CRC-32 (IEEE, reflected, poly 0xEDB88320), bitwise so no table is
/// carried around for fixture-sized inputs.
fn crc32(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            let mask = (crc & 1).wrapping_neg();
            crc = (crc >> 1) ^ (0xEDB8_8320 & mask);
        }
    }
    !crc
}
