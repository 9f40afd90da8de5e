//! Section header table entries.

use crate::codes::SectionType;
use crate::extract::{FieldReader, OutOfBounds};
use crate::flags::SectionAttributes;
use crate::layout::{SectionHeaderField as S, Width};

/// Accessors shared by both section header shapes.
pub trait Section {
    /// Offset of the section's name in the section name string table. Not resolved here.
    fn name_offset(&self) -> u32;
    fn section_type(&self) -> SectionType;
    fn attributes(&self) -> SectionAttributes;
    fn address(&self) -> u64;
    fn file_offset(&self) -> u64;
    fn size(&self) -> u64;
    /// Index of an associated section; meaning depends on the section type.
    fn link(&self) -> u32;
    fn info(&self) -> u32;
    fn alignment(&self) -> u64;
    /// Size of one record for sections holding a table of fixed-size records, else zero.
    fn entry_size(&self) -> u64;

    /// `NOBITS` sections (like `.bss`) take up memory but no file bytes.
    fn occupies_file(&self) -> bool {
        self.section_type() != SectionType::NoBits
    }
}

/// `Elf32_Shdr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionHeader32 {
    pub sh_name: u32,
    pub sh_type: SectionType,
    pub sh_flags: SectionAttributes,
    pub sh_addr: u32,
    pub sh_offset: u32,
    pub sh_size: u32,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u32,
    pub sh_entsize: u32,
}

/// `Elf64_Shdr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionHeader64 {
    pub sh_name: u32,
    pub sh_type: SectionType,
    pub sh_flags: SectionAttributes,
    pub sh_addr: u64,
    pub sh_offset: u64,
    pub sh_size: u64,
    pub sh_link: u32,
    pub sh_info: u32,
    pub sh_addralign: u64,
    pub sh_entsize: u64,
}

impl SectionHeader32 {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        Ok(Self {
            sh_name: reader.read_u32(S::Name)?,
            sh_type: SectionType::from(reader.read_u32(S::Type)?),
            sh_flags: SectionAttributes::from(reader.read(S::Flags)?),
            sh_addr: reader.read_u32(S::Addr)?,
            sh_offset: reader.read_u32(S::Offset)?,
            sh_size: reader.read_u32(S::Size)?,
            sh_link: reader.read_u32(S::Link)?,
            sh_info: reader.read_u32(S::Info)?,
            sh_addralign: reader.read_u32(S::AddrAlign)?,
            sh_entsize: reader.read_u32(S::EntSize)?,
        })
    }
}

impl SectionHeader64 {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        Ok(Self {
            sh_name: reader.read_u32(S::Name)?,
            sh_type: SectionType::from(reader.read_u32(S::Type)?),
            sh_flags: SectionAttributes::from(reader.read(S::Flags)?),
            sh_addr: reader.read(S::Addr)?,
            sh_offset: reader.read(S::Offset)?,
            sh_size: reader.read(S::Size)?,
            sh_link: reader.read_u32(S::Link)?,
            sh_info: reader.read_u32(S::Info)?,
            sh_addralign: reader.read(S::AddrAlign)?,
            sh_entsize: reader.read(S::EntSize)?,
        })
    }
}

impl Section for SectionHeader32 {
    fn name_offset(&self) -> u32 {
        self.sh_name
    }

    fn section_type(&self) -> SectionType {
        self.sh_type
    }

    fn attributes(&self) -> SectionAttributes {
        self.sh_flags
    }

    fn address(&self) -> u64 {
        self.sh_addr as u64
    }

    fn file_offset(&self) -> u64 {
        self.sh_offset as u64
    }

    fn size(&self) -> u64 {
        self.sh_size as u64
    }

    fn link(&self) -> u32 {
        self.sh_link
    }

    fn info(&self) -> u32 {
        self.sh_info
    }

    fn alignment(&self) -> u64 {
        self.sh_addralign as u64
    }

    fn entry_size(&self) -> u64 {
        self.sh_entsize as u64
    }
}

impl Section for SectionHeader64 {
    fn name_offset(&self) -> u32 {
        self.sh_name
    }

    fn section_type(&self) -> SectionType {
        self.sh_type
    }

    fn attributes(&self) -> SectionAttributes {
        self.sh_flags
    }

    fn address(&self) -> u64 {
        self.sh_addr
    }

    fn file_offset(&self) -> u64 {
        self.sh_offset
    }

    fn size(&self) -> u64 {
        self.sh_size
    }

    fn link(&self) -> u32 {
        self.sh_link
    }

    fn info(&self) -> u32 {
        self.sh_info
    }

    fn alignment(&self) -> u64 {
        self.sh_addralign
    }

    fn entry_size(&self) -> u64 {
        self.sh_entsize
    }
}

/// One section header table entry in the shape its file uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionHeader {
    Elf32(SectionHeader32),
    Elf64(SectionHeader64),
}

impl SectionHeader {
    pub fn decode(reader: &FieldReader<'_>) -> Result<Self, OutOfBounds> {
        match reader.width() {
            Width::Elf32 => SectionHeader32::decode(reader).map(SectionHeader::Elf32),
            Width::Elf64 => SectionHeader64::decode(reader).map(SectionHeader::Elf64),
        }
    }

    fn inner(&self) -> &dyn Section {
        match self {
            SectionHeader::Elf32(sh) => sh,
            SectionHeader::Elf64(sh) => sh,
        }
    }
}

impl Section for SectionHeader {
    fn name_offset(&self) -> u32 {
        self.inner().name_offset()
    }

    fn section_type(&self) -> SectionType {
        self.inner().section_type()
    }

    fn attributes(&self) -> SectionAttributes {
        self.inner().attributes()
    }

    fn address(&self) -> u64 {
        self.inner().address()
    }

    fn file_offset(&self) -> u64 {
        self.inner().file_offset()
    }

    fn size(&self) -> u64 {
        self.inner().size()
    }

    fn link(&self) -> u32 {
        self.inner().link()
    }

    fn info(&self) -> u32 {
        self.inner().info()
    }

    fn alignment(&self) -> u64 {
        self.inner().alignment()
    }

    fn entry_size(&self) -> u64 {
        self.inner().entry_size()
    }
}
