//! Program header table entries (segments).
//!
//! The two widths get separate structs because their fields are not in the same
//! order: `p_flags` is the second field of an `Elf64_Phdr` but the seventh of an
//! `Elf32_Phdr`. Struct fields below follow on-disk order for each width.

use crate::codes::SegmentType;
use crate::extract::{FieldReader, OutOfBounds};
use crate::flags::SegmentPermissions;
use crate::layout::{ProgramHeaderField as P, Width};

/// Accessors shared by both program header shapes.
pub trait Segment {
    fn segment_type(&self) -> SegmentType;
    fn permissions(&self) -> SegmentPermissions;
    /// Offset of the segment's first byte in the file.
    fn file_offset(&self) -> u64;
    fn virtual_address(&self) -> u64;
    fn physical_address(&self) -> u64;
    /// Bytes the segment occupies in the file.
    fn file_size(&self) -> u64;
    /// Bytes the segment occupies in memory, at least `file_size` for loadable segments.
    fn memory_size(&self) -> u64;
    fn alignment(&self) -> u64;

    fn is_load(&self) -> bool {
        self.segment_type() == SegmentType::Load
    }
}

/// `Elf32_Phdr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHeader32 {
    pub p_type: SegmentType,
    pub p_offset: u32,
    pub p_vaddr: u32,
    pub p_paddr: u32,
    pub p_filesz: u32,
    pub p_memsz: u32,
    pub p_flags: SegmentPermissions,
    pub p_align: u32,
}

/// `Elf64_Phdr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHeader64 {
    pub p_type: SegmentType,
    pub p_flags: SegmentPermissions,
    pub p_offset: u64,
    pub p_vaddr: u64,
    pub p_paddr: u64,
    pub p_filesz: u64,
    pub p_memsz: u64,
    pub p_align: u64,
}

impl ProgramHeader32 {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        Ok(Self {
            p_type: SegmentType::from(reader.read_u32(P::Type)?),
            p_offset: reader.read_u32(P::Offset)?,
            p_vaddr: reader.read_u32(P::VAddr)?,
            p_paddr: reader.read_u32(P::PAddr)?,
            p_filesz: reader.read_u32(P::FileSz)?,
            p_memsz: reader.read_u32(P::MemSz)?,
            p_flags: SegmentPermissions::from(reader.read_u32(P::Flags)?),
            p_align: reader.read_u32(P::Align)?,
        })
    }
}

impl ProgramHeader64 {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        Ok(Self {
            p_type: SegmentType::from(reader.read_u32(P::Type)?),
            p_flags: SegmentPermissions::from(reader.read_u32(P::Flags)?),
            p_offset: reader.read(P::Offset)?,
            p_vaddr: reader.read(P::VAddr)?,
            p_paddr: reader.read(P::PAddr)?,
            p_filesz: reader.read(P::FileSz)?,
            p_memsz: reader.read(P::MemSz)?,
            p_align: reader.read(P::Align)?,
        })
    }
}

impl Segment for ProgramHeader32 {
    fn segment_type(&self) -> SegmentType {
        self.p_type
    }

    fn permissions(&self) -> SegmentPermissions {
        self.p_flags
    }

    fn file_offset(&self) -> u64 {
        self.p_offset as u64
    }

    fn virtual_address(&self) -> u64 {
        self.p_vaddr as u64
    }

    fn physical_address(&self) -> u64 {
        self.p_paddr as u64
    }

    fn file_size(&self) -> u64 {
        self.p_filesz as u64
    }

    fn memory_size(&self) -> u64 {
        self.p_memsz as u64
    }

    fn alignment(&self) -> u64 {
        self.p_align as u64
    }
}

impl Segment for ProgramHeader64 {
    fn segment_type(&self) -> SegmentType {
        self.p_type
    }

    fn permissions(&self) -> SegmentPermissions {
        self.p_flags
    }

    fn file_offset(&self) -> u64 {
        self.p_offset
    }

    fn virtual_address(&self) -> u64 {
        self.p_vaddr
    }

    fn physical_address(&self) -> u64 {
        self.p_paddr
    }

    fn file_size(&self) -> u64 {
        self.p_filesz
    }

    fn memory_size(&self) -> u64 {
        self.p_memsz
    }

    fn alignment(&self) -> u64 {
        self.p_align
    }
}

/// One program header table entry in the shape its file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramHeader {
    Elf32(ProgramHeader32),
    Elf64(ProgramHeader64),
}

impl ProgramHeader {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        match reader.width() {
            Width::Elf32 => ProgramHeader32::decode(reader).map(ProgramHeader::Elf32),
            Width::Elf64 => ProgramHeader64::decode(reader).map(ProgramHeader::Elf64),
        }
    }

    fn inner(&self) -> &dyn Segment {
        match self {
            ProgramHeader::Elf32(ph) => ph,
            ProgramHeader::Elf64(ph) => ph,
        }
    }
}

impl Segment for ProgramHeader {
    fn segment_type(&self) -> SegmentType {
        self.inner().segment_type()
    }

    fn permissions(&self) -> SegmentPermissions {
        self.inner().permissions()
    }

    fn file_offset(&self) -> u64 {
        self.inner().file_offset()
    }

    fn virtual_address(&self) -> u64 {
        self.inner().virtual_address()
    }

    fn physical_address(&self) -> u64 {
        self.inner().physical_address()
    }

    fn file_size(&self) -> u64 {
        self.inner().file_size()
    }

    fn memory_size(&self) -> u64 {
        self.inner().memory_size()
    }

    fn alignment(&self) -> u64 {
        self.inner().alignment()
    }
}
