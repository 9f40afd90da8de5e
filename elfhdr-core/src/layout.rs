//! Byte layout of the three ELF header shapes.
//!
//! Every field is described by an explicit `(offset, length)` pair per address
//! width. Nothing here is derived from Rust struct layout: the 32-bit and 64-bit
//! tables are written out separately because the two widths do not only differ
//! in field size. The program header `flags` word moves from the end of the
//! entry (32-bit) to right after `type` (64-bit).
//!
//! Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)

use std::fmt;

use goblin::elf::header::{
    EI_ABIVERSION, EI_CLASS, EI_DATA, EI_OSABI, EI_VERSION, ELFCLASS32, ELFCLASS64, ELFDATA2LSB,
    ELFDATA2MSB, SELFMAG,
};

/// Address width of an ELF file, taken from the `EI_CLASS` identification byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Elf32,
    Elf64,
}

impl Width {
    /// Maps the `EI_CLASS` byte. Any value other than `1` or `2` is rejected.
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            ELFCLASS32 => Some(Width::Elf32),
            ELFCLASS64 => Some(Width::Elf64),
            _ => None,
        }
    }

    pub fn class(self) -> u8 {
        match self {
            Width::Elf32 => ELFCLASS32,
            Width::Elf64 => ELFCLASS64,
        }
    }

    /// Number of address bits, 32 or 64.
    pub fn bits(self) -> u8 {
        match self {
            Width::Elf32 => 32,
            Width::Elf64 => 64,
        }
    }

    /// Size in bytes of an address or offset field.
    pub fn word_size(self) -> usize {
        match self {
            Width::Elf32 => 4,
            Width::Elf64 => 8,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Elf32 => write!(f, "ELF32"),
            Width::Elf64 => write!(f, "ELF64"),
        }
    }
}

/// Byte order of multi-byte fields, taken from the `EI_DATA` identification byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Maps the `EI_DATA` byte. Any value other than `1` or `2` is rejected.
    pub fn from_data(data: u8) -> Option<Self> {
        match data {
            ELFDATA2LSB => Some(ByteOrder::Little),
            ELFDATA2MSB => Some(ByteOrder::Big),
            _ => None,
        }
    }

    pub fn data(self) -> u8 {
        match self {
            ByteOrder::Little => ELFDATA2LSB,
            ByteOrder::Big => ELFDATA2MSB,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little endian"),
            ByteOrder::Big => write!(f, "big endian"),
        }
    }
}

/// The fixed ELF signature, `0x7F 'E' 'L' 'F'`.
pub const MAGIC: [u8; SELFMAG] = [0x7f, b'E', b'L', b'F'];

/// Identification bytes, at the same position for both widths.
pub const CLASS_INDEX: usize = EI_CLASS;
pub const DATA_INDEX: usize = EI_DATA;
pub const IDENT_VERSION_INDEX: usize = EI_VERSION;
pub const OSABI_INDEX: usize = EI_OSABI;
pub const ABI_VERSION_INDEX: usize = EI_ABIVERSION;

/// Which of the three header shapes a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderKind {
    File,
    Program,
    Section,
}

impl HeaderKind {
    /// Structural size of one header of this kind. Tables may declare a larger
    /// entry size; the known fields always sit at the front.
    pub fn size(self, width: Width) -> usize {
        use goblin::{elf32, elf64};

        match (self, width) {
            (HeaderKind::File, Width::Elf32) => elf32::header::SIZEOF_EHDR,
            (HeaderKind::File, Width::Elf64) => elf64::header::SIZEOF_EHDR,
            (HeaderKind::Program, Width::Elf32) => elf32::program_header::SIZEOF_PHDR,
            (HeaderKind::Program, Width::Elf64) => elf64::program_header::SIZEOF_PHDR,
            (HeaderKind::Section, Width::Elf32) => elf32::section_header::SIZEOF_SHDR,
            (HeaderKind::Section, Width::Elf64) => elf64::section_header::SIZEOF_SHDR,
        }
    }
}

/// Fields of the file header (`ElfN_Ehdr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileHeaderField {
    Magic,
    Class,
    Data,
    IdentVersion,
    OsAbi,
    AbiVersion,
    Type,
    Machine,
    Version,
    Entry,
    PhOff,
    ShOff,
    Flags,
    EhSize,
    PhEntSize,
    PhNum,
    ShEntSize,
    ShNum,
    ShStrNdx,
}

/// Fields of a program header table entry (`ElfN_Phdr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramHeaderField {
    Type,
    Flags,
    Offset,
    VAddr,
    PAddr,
    FileSz,
    MemSz,
    Align,
}

/// Fields of a section header table entry (`ElfN_Shdr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionHeaderField {
    Name,
    Type,
    Flags,
    Addr,
    Offset,
    Size,
    Link,
    Info,
    AddrAlign,
    EntSize,
}

/// Any field of any header kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    File(FileHeaderField),
    Program(ProgramHeaderField),
    Section(SectionHeaderField),
}

impl Field {
    pub fn kind(self) -> HeaderKind {
        match self {
            Field::File(_) => HeaderKind::File,
            Field::Program(_) => HeaderKind::Program,
            Field::Section(_) => HeaderKind::Section,
        }
    }
}

impl From<FileHeaderField> for Field {
    fn from(field: FileHeaderField) -> Self {
        Field::File(field)
    }
}

impl From<ProgramHeaderField> for Field {
    fn from(field: ProgramHeaderField) -> Self {
        Field::Program(field)
    }
}

impl From<SectionHeaderField> for Field {
    fn from(field: SectionHeaderField) -> Self {
        Field::Section(field)
    }
}

/// Position of a field relative to the start of its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpan {
    pub offset: usize,
    pub length: usize,
}

impl FieldSpan {
    const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    pub fn end(self) -> usize {
        self.offset + self.length
    }
}

/// Looks up where `field` lives for the given width.
pub fn field_layout(width: Width, field: impl Into<Field>) -> FieldSpan {
    match field.into() {
        Field::File(f) => file_header_layout(width, f),
        Field::Program(f) => match width {
            Width::Elf32 => program_header_layout_32(f),
            Width::Elf64 => program_header_layout_64(f),
        },
        Field::Section(f) => match width {
            Width::Elf32 => section_header_layout_32(f),
            Width::Elf64 => section_header_layout_64(f),
        },
    }
}

fn file_header_layout(width: Width, field: FileHeaderField) -> FieldSpan {
    use FileHeaderField::*;
    use Width::{Elf32, Elf64};

    match (width, field) {
        (_, Magic) => FieldSpan::new(0, SELFMAG),
        (_, Class) => FieldSpan::new(CLASS_INDEX, 1),
        (_, Data) => FieldSpan::new(DATA_INDEX, 1),
        (_, IdentVersion) => FieldSpan::new(IDENT_VERSION_INDEX, 1),
        (_, OsAbi) => FieldSpan::new(OSABI_INDEX, 1),
        (_, AbiVersion) => FieldSpan::new(ABI_VERSION_INDEX, 1),
        (_, Type) => FieldSpan::new(16, 2),
        (_, Machine) => FieldSpan::new(18, 2),
        (_, Version) => FieldSpan::new(20, 4),

        (Elf32, Entry) => FieldSpan::new(24, 4),
        (Elf32, PhOff) => FieldSpan::new(28, 4),
        (Elf32, ShOff) => FieldSpan::new(32, 4),
        (Elf32, Flags) => FieldSpan::new(36, 4),
        (Elf32, EhSize) => FieldSpan::new(40, 2),
        (Elf32, PhEntSize) => FieldSpan::new(42, 2),
        (Elf32, PhNum) => FieldSpan::new(44, 2),
        (Elf32, ShEntSize) => FieldSpan::new(46, 2),
        (Elf32, ShNum) => FieldSpan::new(48, 2),
        (Elf32, ShStrNdx) => FieldSpan::new(50, 2),

        (Elf64, Entry) => FieldSpan::new(24, 8),
        (Elf64, PhOff) => FieldSpan::new(32, 8),
        (Elf64, ShOff) => FieldSpan::new(40, 8),
        (Elf64, Flags) => FieldSpan::new(48, 4),
        (Elf64, EhSize) => FieldSpan::new(52, 2),
        (Elf64, PhEntSize) => FieldSpan::new(54, 2),
        (Elf64, PhNum) => FieldSpan::new(56, 2),
        (Elf64, ShEntSize) => FieldSpan::new(58, 2),
        (Elf64, ShNum) => FieldSpan::new(60, 2),
        (Elf64, ShStrNdx) => FieldSpan::new(62, 2),
    }
}

fn program_header_layout_32(field: ProgramHeaderField) -> FieldSpan {
    use ProgramHeaderField::*;

    match field {
        Type => FieldSpan::new(0, 4),
        Offset => FieldSpan::new(4, 4),
        VAddr => FieldSpan::new(8, 4),
        PAddr => FieldSpan::new(12, 4),
        FileSz => FieldSpan::new(16, 4),
        MemSz => FieldSpan::new(20, 4),
        Flags => FieldSpan::new(24, 4),
        Align => FieldSpan::new(28, 4),
    }
}

fn program_header_layout_64(field: ProgramHeaderField) -> FieldSpan {
    use ProgramHeaderField::*;

    match field {
        Type => FieldSpan::new(0, 4),
        Flags => FieldSpan::new(4, 4),
        Offset => FieldSpan::new(8, 8),
        VAddr => FieldSpan::new(16, 8),
        PAddr => FieldSpan::new(24, 8),
        FileSz => FieldSpan::new(32, 8),
        MemSz => FieldSpan::new(40, 8),
        Align => FieldSpan::new(48, 8),
    }
}

fn section_header_layout_32(field: SectionHeaderField) -> FieldSpan {
    use SectionHeaderField::*;

    match field {
        Name => FieldSpan::new(0, 4),
        Type => FieldSpan::new(4, 4),
        Flags => FieldSpan::new(8, 4),
        Addr => FieldSpan::new(12, 4),
        Offset => FieldSpan::new(16, 4),
        Size => FieldSpan::new(20, 4),
        Link => FieldSpan::new(24, 4),
        Info => FieldSpan::new(28, 4),
        AddrAlign => FieldSpan::new(32, 4),
        EntSize => FieldSpan::new(36, 4),
    }
}

fn section_header_layout_64(field: SectionHeaderField) -> FieldSpan {
    use SectionHeaderField::*;

    match field {
        Name => FieldSpan::new(0, 4),
        Type => FieldSpan::new(4, 4),
        Flags => FieldSpan::new(8, 8),
        Addr => FieldSpan::new(16, 8),
        Offset => FieldSpan::new(24, 8),
        Size => FieldSpan::new(32, 8),
        Link => FieldSpan::new(40, 4),
        Info => FieldSpan::new(44, 4),
        AddrAlign => FieldSpan::new(48, 8),
        EntSize => FieldSpan::new(56, 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE_FIELDS: [FileHeaderField; 19] = [
        FileHeaderField::Magic,
        FileHeaderField::Class,
        FileHeaderField::Data,
        FileHeaderField::IdentVersion,
        FileHeaderField::OsAbi,
        FileHeaderField::AbiVersion,
        FileHeaderField::Type,
        FileHeaderField::Machine,
        FileHeaderField::Version,
        FileHeaderField::Entry,
        FileHeaderField::PhOff,
        FileHeaderField::ShOff,
        FileHeaderField::Flags,
        FileHeaderField::EhSize,
        FileHeaderField::PhEntSize,
        FileHeaderField::PhNum,
        FileHeaderField::ShEntSize,
        FileHeaderField::ShNum,
        FileHeaderField::ShStrNdx,
    ];

    const PROGRAM_FIELDS: [ProgramHeaderField; 8] = [
        ProgramHeaderField::Type,
        ProgramHeaderField::Flags,
        ProgramHeaderField::Offset,
        ProgramHeaderField::VAddr,
        ProgramHeaderField::PAddr,
        ProgramHeaderField::FileSz,
        ProgramHeaderField::MemSz,
        ProgramHeaderField::Align,
    ];

    const SECTION_FIELDS: [SectionHeaderField; 10] = [
        SectionHeaderField::Name,
        SectionHeaderField::Type,
        SectionHeaderField::Flags,
        SectionHeaderField::Addr,
        SectionHeaderField::Offset,
        SectionHeaderField::Size,
        SectionHeaderField::Link,
        SectionHeaderField::Info,
        SectionHeaderField::AddrAlign,
        SectionHeaderField::EntSize,
    ];

    /// Sorting the spans by offset must give a gapless tiling of `size` bytes.
    fn assert_tiles(mut spans: Vec<FieldSpan>, size: usize) {
        spans.sort_by_key(|s| s.offset);
        let mut cursor = 0;
        for span in spans {
            assert_eq!(span.offset, cursor, "gap or overlap at {span:?}");
            cursor = span.end();
        }
        assert_eq!(cursor, size);
    }

    #[test]
    fn file_header_fields_tile_the_header() {
        for width in [Width::Elf32, Width::Elf64] {
            let mut spans: Vec<_> = FILE_FIELDS.iter().map(|f| field_layout(width, *f)).collect();
            // e_ident padding after EI_ABIVERSION.
            spans.push(FieldSpan::new(9, 7));
            assert_tiles(spans, HeaderKind::File.size(width));
        }
    }

    #[test]
    fn entry_fields_tile_their_structural_size() {
        for width in [Width::Elf32, Width::Elf64] {
            let program = PROGRAM_FIELDS.iter().map(|f| field_layout(width, *f)).collect();
            assert_tiles(program, HeaderKind::Program.size(width));

            let section = SECTION_FIELDS.iter().map(|f| field_layout(width, *f)).collect();
            assert_tiles(section, HeaderKind::Section.size(width));
        }
    }

    #[test]
    fn structural_sizes_match_the_elf_definitions() {
        assert_eq!(HeaderKind::File.size(Width::Elf32), 52);
        assert_eq!(HeaderKind::File.size(Width::Elf64), 64);
        assert_eq!(HeaderKind::Program.size(Width::Elf32), 32);
        assert_eq!(HeaderKind::Program.size(Width::Elf64), 56);
        assert_eq!(HeaderKind::Section.size(Width::Elf32), 40);
        assert_eq!(HeaderKind::Section.size(Width::Elf64), 64);
    }

    #[test]
    fn program_flags_move_between_widths() {
        let flags32 = field_layout(Width::Elf32, ProgramHeaderField::Flags);
        let align32 = field_layout(Width::Elf32, ProgramHeaderField::Align);
        assert_eq!(flags32.end(), align32.offset);

        let type64 = field_layout(Width::Elf64, ProgramHeaderField::Type);
        let flags64 = field_layout(Width::Elf64, ProgramHeaderField::Flags);
        assert_eq!(type64.end(), flags64.offset);
    }

    #[test]
    fn address_fields_widen() {
        for field in [FileHeaderField::Entry, FileHeaderField::PhOff, FileHeaderField::ShOff] {
            assert_eq!(field_layout(Width::Elf32, field).length, 4);
            assert_eq!(field_layout(Width::Elf64, field).length, 8);
        }
    }

    #[test]
    fn ident_bytes_map_both_ways() {
        assert_eq!(Width::from_class(1), Some(Width::Elf32));
        assert_eq!(Width::from_class(2), Some(Width::Elf64));
        assert_eq!(Width::from_class(0), None);
        assert_eq!(Width::from_class(3), None);
        assert_eq!(ByteOrder::from_data(1), Some(ByteOrder::Little));
        assert_eq!(ByteOrder::from_data(2), Some(ByteOrder::Big));
        assert_eq!(ByteOrder::from_data(0), None);
        assert_eq!(Width::Elf64.class(), 2);
        assert_eq!(ByteOrder::Big.data(), 2);
    }

    #[test]
    fn field_kind_follows_the_wrapped_field() {
        assert_eq!(Field::from(FileHeaderField::Entry).kind(), HeaderKind::File);
        assert_eq!(Field::from(ProgramHeaderField::Align).kind(), HeaderKind::Program);
        assert_eq!(Field::from(SectionHeaderField::Link).kind(), HeaderKind::Section);
    }
}
