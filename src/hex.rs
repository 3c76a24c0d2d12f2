use itertools::Itertools;

use crate::PatchError;

/// Reads a little-endian `u16` at `offset`.
pub fn read_u16_le(bytes: &[u8], offset: usize) -> Result<u16, PatchError> {
    let window = bytes
        .get(offset..offset + 2)
        .ok_or(PatchError::OutOfBounds { offset, len: 2 })?;
    Ok(u16::from_le_bytes(window.try_into()?))
}

/// Reads a little-endian `u32` at `offset`.
pub fn read_u32_le(bytes: &[u8], offset: usize) -> Result<u32, PatchError> {
    let window = bytes
        .get(offset..offset + 4)
        .ok_or(PatchError::OutOfBounds { offset, len: 4 })?;
    Ok(u32::from_le_bytes(window.try_into()?))
}

/// Renders `bytes` as lowercase hex pairs separated by spaces.
pub fn hexdump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).join(" ")
}

/// Renders consecutive byte pairs as little-endian 16-bit values,
/// `0xNNNN` comma-separated and wrapping every 16 values. A trailing odd
/// byte is ignored.
pub fn hexdump_le_table(bytes: &[u8]) -> String {
    bytes
        .chunks_exact(2)
        .map(|pair| format!("0x{:04x}", u16::from_le_bytes([pair[0], pair[1]])))
        .chunks(16)
        .into_iter()
        .map(|mut row| row.join(","))
        .join(",\n")
}
