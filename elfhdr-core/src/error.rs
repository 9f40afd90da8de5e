use std::fmt;

use crate::extract::OutOfBounds;

/// The two header tables that follow the file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    ProgramHeaders,
    SectionHeaders,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::ProgramHeaders => write!(f, "program header table"),
            Table::SectionHeaders => write!(f, "section header table"),
        }
    }
}

/// Why a buffer could not be decoded. Every variant is terminal: no partial
/// header or table is ever returned alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The first four bytes are not `0x7F 'E' 'L' 'F'`.
    InvalidMagic { found: [u8; 4] },
    /// `EI_CLASS` is neither 32-bit nor 64-bit.
    UnsupportedWidth(u8),
    /// `EI_DATA` is neither little nor big endian.
    UnsupportedByteOrder(u8),
    /// The buffer ends before the fixed-size file header does.
    TruncatedHeader { required: usize, available: usize },
    /// The declared table runs past the end of the buffer. `index` is the first
    /// entry that does not fit.
    TruncatedTable { table: Table, index: u64 },
    /// The declared entry size cannot hold the fields of one entry.
    UndersizedEntry {
        table: Table,
        declared: u16,
        required: usize,
    },
    /// A segment or section claims file bytes past the end of the buffer.
    EntryOutOfBounds {
        table: Table,
        index: usize,
        offset: u64,
        size: u64,
    },
    /// A raw field read crossed the end of the buffer.
    OutOfBounds(OutOfBounds),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::InvalidMagic { found } => write!(
                f,
                "not an ELF file: bad magic {:02x} {:02x} {:02x} {:02x}",
                found[0], found[1], found[2], found[3]
            ),
            DecodeError::UnsupportedWidth(class) => {
                write!(f, "unsupported ELF class {class:#x}")
            }
            DecodeError::UnsupportedByteOrder(data) => {
                write!(f, "unsupported ELF data encoding {data:#x}")
            }
            DecodeError::TruncatedHeader {
                required,
                available,
            } => write!(
                f,
                "truncated file header: need {required} bytes, have {available}"
            ),
            DecodeError::TruncatedTable { table, index } => {
                write!(f, "{table} truncated at entry {index}")
            }
            DecodeError::UndersizedEntry {
                table,
                declared,
                required,
            } => write!(
                f,
                "{table} entry size {declared} is smaller than the required {required}"
            ),
            DecodeError::EntryOutOfBounds {
                table,
                index,
                offset,
                size,
            } => write!(
                f,
                "{table} entry {index} covers {offset:#x}+{size:#x}, past the end of the file"
            ),
            DecodeError::OutOfBounds(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<OutOfBounds> for DecodeError {
    fn from(err: OutOfBounds) -> Self {
        DecodeError::OutOfBounds(err)
    }
}
