//! Decoding of the ELF header region.
//!
//! Three forward-only stages:
//!
//! 1. [`identify`]: magic, address width and byte order.
//! 2. [`decode_file_header`]: the fixed-size file header for that width.
//! 3. [`decode_program_headers`] then [`decode_section_headers`]: each table is
//!    checked against the buffer as a whole before its first entry is read, then
//!    every entry is decoded and checked on its own.
//!
//! Any failure aborts the decode. Nothing here allocates beyond the output
//! tables, performs I/O, or logs.

use crate::error::{DecodeError, Table};
use crate::extract::{FieldReader, OutOfBounds};
use crate::header::{FileHeader, ProgramHeader, Section, SectionHeader, Segment};
use crate::layout::{ByteOrder, HeaderKind, Width, DATA_INDEX, CLASS_INDEX, MAGIC};

/// `e_phnum` value meaning "the real count is in `sh_info` of section 0".
const PN_XNUM: u16 = 0xffff;
/// `e_shstrndx` value meaning "the real index is in `sh_link` of section 0".
const SHN_XINDEX: u16 = 0xffff;

/// The decoded header region of one ELF buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElfHeaders {
    file_header: FileHeader,
    program_headers: Vec<ProgramHeader>,
    section_headers: Vec<SectionHeader>,
    section_name_index: u32,
}

impl ElfHeaders {
    /// Decodes `bytes`, which must start with the ELF file header.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        decode(bytes)
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    /// Program headers in table order.
    pub fn program_headers(&self) -> &[ProgramHeader] {
        &self.program_headers
    }

    /// Section headers in table order.
    pub fn section_headers(&self) -> &[SectionHeader] {
        &self.section_headers
    }

    /// Index of the section name string table, after extended numbering is
    /// applied. Compare with `file_header().shstrndx`, which is the raw value.
    pub fn section_name_index(&self) -> u32 {
        self.section_name_index
    }
}

/// Decodes the file header and both header tables of `bytes`.
pub fn decode(bytes: &[u8]) -> Result<ElfHeaders, DecodeError> {
    let (width, order) = identify(bytes)?;
    let file_header = decode_file_header(bytes, width, order)?;

    let zero = section_zero(bytes, &file_header)?;
    let counts = TableCounts::resolve(&file_header, zero.as_ref());

    let program_headers = decode_program_headers(bytes, &file_header, counts.segments)?;
    let section_headers = decode_section_headers(bytes, &file_header, counts.sections)?;

    Ok(ElfHeaders {
        file_header,
        program_headers,
        section_headers,
        section_name_index: counts.section_name_index,
    })
}

/// Stage 1: checks the magic and reads the width and byte order bytes.
///
/// Anything shorter than the smallest file header is truncated, whatever its
/// first bytes hold. The width-specific size is checked in stage 2.
pub fn identify(bytes: &[u8]) -> Result<(Width, ByteOrder), DecodeError> {
    let required = HeaderKind::File.size(Width::Elf32);
    if bytes.len() < required {
        return Err(DecodeError::TruncatedHeader {
            required,
            available: bytes.len(),
        });
    }

    let magic = &bytes[..MAGIC.len()];
    if magic != MAGIC {
        return Err(DecodeError::InvalidMagic {
            found: [magic[0], magic[1], magic[2], magic[3]],
        });
    }

    let class = bytes[CLASS_INDEX];
    let width = Width::from_class(class).ok_or(DecodeError::UnsupportedWidth(class))?;

    let data = bytes[DATA_INDEX];
    let order = ByteOrder::from_data(data).ok_or(DecodeError::UnsupportedByteOrder(data))?;

    Ok((width, order))
}

/// Stage 2: reads the file header once the buffer is known to hold all of it.
pub fn decode_file_header(
    bytes: &[u8],
    width: Width,
    order: ByteOrder,
) -> Result<FileHeader, DecodeError> {
    let required = HeaderKind::File.size(width);
    if bytes.len() < required {
        return Err(DecodeError::TruncatedHeader {
            required,
            available: bytes.len(),
        });
    }

    let reader = FieldReader::new(bytes, 0, width, order);
    Ok(FileHeader::decode(&reader)?)
}

/// Stage 3a: the program header table, `count` entries long.
///
/// `count` is normally `header.phnum`; [`decode`] passes the value resolved
/// through extended numbering.
pub fn decode_program_headers(
    bytes: &[u8],
    header: &FileHeader,
    count: u64,
) -> Result<Vec<ProgramHeader>, DecodeError> {
    let geometry = TableGeometry {
        offset: header.phoff,
        entry_size: header.phentsize,
        count,
    };
    decode_table(bytes, header, geometry)
}

/// Stage 3b: the section header table, `count` entries long.
pub fn decode_section_headers(
    bytes: &[u8],
    header: &FileHeader,
    count: u64,
) -> Result<Vec<SectionHeader>, DecodeError> {
    let geometry = TableGeometry {
        offset: header.shoff,
        entry_size: header.shentsize,
        count,
    };
    decode_table(bytes, header, geometry)
}

/// Where a table sits and how it is strided, as declared by the file header.
#[derive(Debug, Clone, Copy)]
struct TableGeometry {
    offset: u64,
    entry_size: u16,
    count: u64,
}

impl TableGeometry {
    /// Checks the whole table against the buffer before any entry is read.
    fn check(&self, table: Table, required: usize, len: usize) -> Result<(), DecodeError> {
        if (self.entry_size as usize) < required {
            return Err(DecodeError::UndersizedEntry {
                table,
                declared: self.entry_size,
                required,
            });
        }

        let stride = self.entry_size as u64;
        let len = len as u64;
        let end = stride
            .checked_mul(self.count)
            .and_then(|size| self.offset.checked_add(size));

        match end {
            Some(end) if end <= len => Ok(()),
            _ => Err(DecodeError::TruncatedTable {
                table,
                index: len.saturating_sub(self.offset) / stride,
            }),
        }
    }

    fn entry_offset(&self, index: u64) -> u64 {
        self.offset + index * self.entry_size as u64
    }
}

/// An entry type of one of the two header tables.
trait TableEntry: Sized {
    const TABLE: Table;
    const KIND: HeaderKind;

    fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds>;

    /// `(offset, size)` of the file bytes the entry describes, if it has any.
    fn file_extent(&self) -> Option<(u64, u64)>;
}

impl TableEntry for ProgramHeader {
    const TABLE: Table = Table::ProgramHeaders;
    const KIND: HeaderKind = HeaderKind::Program;

    fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        ProgramHeader::decode(reader)
    }

    fn file_extent(&self) -> Option<(u64, u64)> {
        Some((self.file_offset(), self.file_size()))
    }
}

impl TableEntry for SectionHeader {
    const TABLE: Table = Table::SectionHeaders;
    const KIND: HeaderKind = HeaderKind::Section;

    fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        SectionHeader::decode(reader)
    }

    fn file_extent(&self) -> Option<(u64, u64)> {
        self.occupies_file()
            .then(|| (self.file_offset(), self.size()))
    }
}

fn decode_table<T: TableEntry>(
    bytes: &[u8],
    header: &FileHeader,
    geometry: TableGeometry,
) -> Result<Vec<T>, DecodeError> {
    if geometry.count == 0 {
        return Ok(Vec::new());
    }

    geometry.check(T::TABLE, T::KIND.size(header.width), bytes.len())?;

    // The check above bounds `count` by the buffer length.
    let mut entries = Vec::with_capacity(geometry.count as usize);
    for index in 0..geometry.count {
        let reader = FieldReader::new(
            bytes,
            geometry.entry_offset(index),
            header.width,
            header.byte_order,
        );
        let entry = T::decode(&reader)?;

        if let Some((offset, size)) = entry.file_extent() {
            let fits = offset
                .checked_add(size)
                .is_some_and(|end| end <= bytes.len() as u64);
            if !fits {
                return Err(DecodeError::EntryOutOfBounds {
                    table: T::TABLE,
                    index: index as usize,
                    offset,
                    size,
                });
            }
        }

        entries.push(entry);
    }

    Ok(entries)
}

/// Reads section header 0 when the file header defers any count to it.
fn section_zero(bytes: &[u8], header: &FileHeader) -> Result<Option<SectionHeader>, DecodeError> {
    let deferred = (header.shnum == 0 && header.shoff != 0)
        || header.phnum == PN_XNUM
        || header.shstrndx == SHN_XINDEX;
    if !deferred || header.shoff == 0 {
        return Ok(None);
    }

    let geometry = TableGeometry {
        offset: header.shoff,
        entry_size: header.shentsize,
        count: 1,
    };
    geometry.check(
        Table::SectionHeaders,
        HeaderKind::Section.size(header.width),
        bytes.len(),
    )?;

    let reader = FieldReader::new(bytes, header.shoff, header.width, header.byte_order);
    Ok(Some(SectionHeader::decode(&reader)?))
}

/// Table sizes after applying extended numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TableCounts {
    segments: u64,
    sections: u64,
    section_name_index: u32,
}

impl TableCounts {
    fn resolve(header: &FileHeader, zero: Option<&SectionHeader>) -> Self {
        let Some(zero) = zero else {
            return Self {
                segments: header.phnum as u64,
                sections: header.shnum as u64,
                section_name_index: header.shstrndx as u32,
            };
        };

        Self {
            segments: if header.phnum == PN_XNUM {
                zero.info() as u64
            } else {
                header.phnum as u64
            },
            sections: if header.shnum == 0 {
                zero.size()
            } else {
                header.shnum as u64
            },
            section_name_index: if header.shstrndx == SHN_XINDEX {
                zero.link()
            } else {
                header.shstrndx as u32
            },
        }
    }
}
