//! Bounds-checked field extraction.
//!
//! Every integer the decoder reads goes through [`read_field`]. A read either
//! returns the whole field or fails; nothing past the end of the buffer is ever
//! touched.

use std::fmt;

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::layout::{field_layout, ByteOrder, Field, Width};

/// A read that would cross the end of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    pub offset: u64,
    pub length: usize,
    pub available: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read of {} bytes at offset {:#x} exceeds buffer of {} bytes",
            self.length, self.offset, self.available
        )
    }
}

impl std::error::Error for OutOfBounds {}

/// Returns the `length` bytes starting at `offset`, or `None` when the window
/// does not fit inside `buffer`.
pub fn window(buffer: &[u8], offset: u64, length: usize) -> Option<&[u8]> {
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(length)?;
    buffer.get(start..end)
}

/// Reads an unsigned integer of `length` bytes (1 to 8) at `offset`.
pub fn read_field(
    buffer: &[u8],
    offset: u64,
    length: usize,
    order: ByteOrder,
) -> Result<u64, OutOfBounds> {
    debug_assert!((1..=8).contains(&length), "field length {length} out of range");

    let bytes = window(buffer, offset, length).ok_or(OutOfBounds {
        offset,
        length,
        available: buffer.len(),
    })?;

    Ok(match order {
        ByteOrder::Little => LittleEndian::read_uint(bytes, length),
        ByteOrder::Big => BigEndian::read_uint(bytes, length),
    })
}

/// Reads named fields of one header located at `base` inside a buffer.
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    buffer: &'a [u8],
    base: u64,
    width: Width,
    order: ByteOrder,
}

impl<'a> FieldReader<'a> {
    pub fn new(buffer: &'a [u8], base: u64, width: Width, order: ByteOrder) -> Self {
        Self {
            buffer,
            base,
            width,
            order,
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Reads `field` at its position for this reader's width.
    pub fn read(&self, field: impl Into<Field>) -> Result<u64, OutOfBounds> {
        let span = field_layout(self.width, field);
        let offset = self.base.checked_add(span.offset as u64).ok_or(OutOfBounds {
            offset: self.base,
            length: span.length,
            available: self.buffer.len(),
        })?;
        read_field(self.buffer, offset, span.length, self.order)
    }

    /// Reads a field that is at most 32 bits wide for every width.
    pub fn read_u32(&self, field: impl Into<Field>) -> Result<u32, OutOfBounds> {
        self.read(field).map(|v| v as u32)
    }

    /// Reads a field that is at most 16 bits wide for every width.
    pub fn read_u16(&self, field: impl Into<Field>) -> Result<u16, OutOfBounds> {
        self.read(field).map(|v| v as u16)
    }

    pub fn read_u8(&self, field: impl Into<Field>) -> Result<u8, OutOfBounds> {
        self.read(field).map(|v| v as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ProgramHeaderField;

    const BYTES: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn little_endian_puts_least_significant_byte_first() {
        assert_eq!(read_field(&BYTES, 0, 2, ByteOrder::Little), Ok(0x0201));
        assert_eq!(read_field(&BYTES, 0, 4, ByteOrder::Little), Ok(0x0403_0201));
        assert_eq!(
            read_field(&BYTES, 0, 8, ByteOrder::Little),
            Ok(0x0807_0605_0403_0201)
        );
    }

    #[test]
    fn big_endian_puts_most_significant_byte_first() {
        assert_eq!(read_field(&BYTES, 0, 2, ByteOrder::Big), Ok(0x0102));
        assert_eq!(read_field(&BYTES, 4, 4, ByteOrder::Big), Ok(0x0506_0708));
        assert_eq!(read_field(&BYTES, 7, 1, ByteOrder::Big), Ok(0x08));
    }

    #[test]
    fn read_ending_exactly_at_buffer_end_succeeds() {
        assert_eq!(read_field(&BYTES, 4, 4, ByteOrder::Little), Ok(0x0807_0605));
    }

    #[test]
    fn read_past_the_end_fails_without_partial_value() {
        let err = read_field(&BYTES, 5, 4, ByteOrder::Little).unwrap_err();
        assert_eq!(
            err,
            OutOfBounds {
                offset: 5,
                length: 4,
                available: 8
            }
        );
        assert!(read_field(&[], 0, 1, ByteOrder::Big).is_err());
    }

    #[test]
    fn huge_offsets_do_not_wrap() {
        assert!(read_field(&BYTES, u64::MAX, 4, ByteOrder::Little).is_err());
        assert!(read_field(&BYTES, u64::MAX - 1, 2, ByteOrder::Little).is_err());
        assert!(window(&BYTES, usize::MAX as u64, 2).is_none());
    }

    #[test]
    fn field_reader_honours_base_and_width() {
        // A 64-bit program header's flags word sits at +4, a 32-bit one at +24.
        let mut buffer = vec![0u8; 64];
        buffer[8 + 4] = 0x5;
        buffer[8 + 24] = 0x6;

        let r64 = FieldReader::new(&buffer, 8, Width::Elf64, ByteOrder::Little);
        assert_eq!(r64.read_u32(ProgramHeaderField::Flags), Ok(5));

        let r32 = FieldReader::new(&buffer, 8, Width::Elf32, ByteOrder::Little);
        assert_eq!(r32.read_u32(ProgramHeaderField::Flags), Ok(6));
    }

    #[test]
    fn field_reader_rejects_entries_hanging_off_the_end() {
        let buffer = [0u8; 40];
        let reader = FieldReader::new(&buffer, 8, Width::Elf64, ByteOrder::Little);
        assert!(reader.read(ProgramHeaderField::Type).is_ok());
        assert!(reader.read(ProgramHeaderField::Align).is_err());
    }
}
