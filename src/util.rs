//! Byte and bit helpers shared by the card decoders.
//!
//! All readers return `None` instead of panicking when the requested range
//! falls outside the buffer.

use std::fmt::Write;

const HEX_DUMP_ROW: usize = 16;

pub fn hex_string(data: &[u8]) -> String {
    hex::encode(data)
}

/// Renders `data` as rows of 16 bytes prefixed with the row offset.
///
/// ```text
/// 0000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f
/// 0010: 10 11
/// ```
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3 + (data.len() / HEX_DUMP_ROW + 1) * 7);
    for (row, chunk) in data.chunks(HEX_DUMP_ROW).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{:04x}:", row * HEX_DUMP_ROW);
        for byte in chunk {
            let _ = write!(out, " {:02x}", byte);
        }
    }
    out
}

/// Parses a hex string, ignoring whitespace, `:` separators and a leading `0x`.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(cleaned)
}

/// Reads `len` bytes at `offset` as a big-endian unsigned integer.
pub fn be_uint(data: &[u8], offset: usize, len: usize) -> Option<u64> {
    let bytes = slice(data, offset, len)?;
    Some(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

/// Reads `len` bytes at `offset` as a little-endian unsigned integer.
pub fn le_uint(data: &[u8], offset: usize, len: usize) -> Option<u64> {
    let bytes = slice(data, offset, len)?;
    Some(bytes.iter().rev().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

fn slice(data: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    if len == 0 || len > 8 {
        return None;
    }
    data.get(offset..offset.checked_add(len)?)
}

/// Extracts `len` bits starting at `start_bit`, counting from the most
/// significant bit of the first byte.
pub fn bits_be(data: &[u8], start_bit: usize, len: usize) -> Option<u32> {
    check_bit_range(data, start_bit, len)?;
    let mut value = 0u32;
    for bit in start_bit..start_bit + len {
        let byte = data[bit / 8];
        let set = (byte >> (7 - bit % 8)) & 1;
        value = (value << 1) | set as u32;
    }
    Some(value)
}

/// Extracts `len` bits starting at `start_bit`, counting from the least
/// significant bit of the first byte. The first bit read becomes bit 0 of
/// the result.
pub fn bits_le(data: &[u8], start_bit: usize, len: usize) -> Option<u32> {
    check_bit_range(data, start_bit, len)?;
    let mut value = 0u32;
    for (i, bit) in (start_bit..start_bit + len).enumerate() {
        let byte = data[bit / 8];
        let set = (byte >> (bit % 8)) & 1;
        value |= (set as u32) << i;
    }
    Some(value)
}

pub fn bits_be_signed(data: &[u8], start_bit: usize, len: usize) -> Option<i32> {
    let raw = bits_be(data, start_bit, len)?;
    Some(unsigned_to_twos_complement(raw, len as u32 - 1))
}

fn check_bit_range(data: &[u8], start_bit: usize, len: usize) -> Option<()> {
    if len == 0 || len > 32 {
        return None;
    }
    let end = start_bit.checked_add(len)?;
    (end <= data.len() * 8).then_some(())
}

/// Interprets `input` as a two's complement number whose sign bit is
/// `highest_bit`.
pub fn unsigned_to_twos_complement(input: u32, highest_bit: u32) -> i32 {
    if highest_bit >= 31 {
        return input as i32;
    }
    if (input >> highest_bit) & 1 == 1 {
        (input as i64 - (1i64 << (highest_bit + 1))) as i32
    } else {
        input as i32
    }
}

pub fn is_all_zero(data: &[u8]) -> bool {
    data.iter().all(|&b| b == 0)
}

/// True when every byte is printable ASCII, CR or LF.
pub fn is_ascii(data: &[u8]) -> bool {
    data.iter()
        .all(|&b| (0x20..=0x7E).contains(&b) || b == b'\n' || b == b'\r')
}
