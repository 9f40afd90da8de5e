use crate::codes::{Abi, Machine, ObjectType};
use crate::extract::{FieldReader, OutOfBounds};
use crate::header::Header;
use crate::layout::{ByteOrder, FileHeaderField as F, Width, MAGIC};

/// The ELF file header, decoded for either address width.
///
/// Corresponds to `Elf32_Ehdr` / `Elf64_Ehdr`. Address and offset fields are
/// widened to `u64` so both widths share one shape; the original width is kept
/// in [`width`](FileHeader::width).
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileHeader {
    /// Always `0x7F`, `'E'`, `'L'`, `'F'` for a decoded header.
    pub magic: [u8; 4],

    /// Address width, from `EI_CLASS`.
    pub width: Width,

    /// Encoding of every multi-byte field, from `EI_DATA`.
    pub byte_order: ByteOrder,

    /// Identification version, `EI_VERSION` (normally `1`).
    pub ident_version: u8,

    /// Target operating system ABI, `EI_OSABI`.
    pub abi: Abi,

    /// ABI version, `EI_ABIVERSION`. Its meaning depends on `abi`.
    pub abi_version: u8,

    /// Object file type (relocatable, executable, shared, core).
    ///
    /// Common values:
    /// - `ET_REL` (1): Relocatable file
    /// - `ET_EXEC` (2): Executable file
    /// - `ET_DYN` (3): Shared object
    pub object_type: ObjectType,

    /// Target architecture (e.g., x86_64, ARM).
    pub machine: Machine,

    /// Object file version, `e_version` (usually `EV_CURRENT` = 1).
    pub version: u32,

    /// Virtual address of the program entry point, zero if there is none.
    pub entry: u64,

    /// File offset of the program header table, zero if there is none.
    pub phoff: u64,

    /// File offset of the section header table, zero if there is none.
    pub shoff: u64,

    /// Processor-specific flags.
    pub flags: u32,

    /// Size of this header as declared by the file (52 or 64 normally).
    pub ehsize: u16,

    /// Size of one entry in the program header table.
    pub phentsize: u16,

    /// Number of entries in the program header table, as declared.
    ///
    /// `0xFFFF` means the real count is stored in section header 0; see
    /// [`ElfHeaders`](crate::ElfHeaders) for the resolved value.
    pub phnum: u16,

    /// Size of one entry in the section header table.
    pub shentsize: u16,

    /// Number of entries in the section header table, as declared.
    ///
    /// Zero with a non-zero `shoff` means the real count is stored in section
    /// header 0.
    pub shnum: u16,

    /// Index of the section header string table, as declared.
    pub shstrndx: u16,
}

impl FileHeader {
    /// Reads every field through `reader`. Identification bytes have already
    /// been validated by the caller; the reader's width and order come from them.
    pub fn decode(reader: &FieldReader<'_>) -> Result<FileHeader, OutOfBounds> {
        let magic = reader.read_u32(F::Magic)?;
        let magic = match reader.order() {
            ByteOrder::Little => magic.to_le_bytes(),
            ByteOrder::Big => magic.to_be_bytes(),
        };

        Ok(FileHeader {
            magic,
            width: reader.width(),
            byte_order: reader.order(),
            ident_version: reader.read_u8(F::IdentVersion)?,
            abi: Abi::from(reader.read_u8(F::OsAbi)?),
            abi_version: reader.read_u8(F::AbiVersion)?,
            object_type: ObjectType::from(reader.read_u16(F::Type)?),
            machine: Machine::from(reader.read_u16(F::Machine)?),
            version: reader.read_u32(F::Version)?,
            entry: reader.read(F::Entry)?,
            phoff: reader.read(F::PhOff)?,
            shoff: reader.read(F::ShOff)?,
            flags: reader.read_u32(F::Flags)?,
            ehsize: reader.read_u16(F::EhSize)?,
            phentsize: reader.read_u16(F::PhEntSize)?,
            phnum: reader.read_u16(F::PhNum)?,
            shentsize: reader.read_u16(F::ShEntSize)?,
            shnum: reader.read_u16(F::ShNum)?,
            shstrndx: reader.read_u16(F::ShStrNdx)?,
        })
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }
}

impl Header for FileHeader {
    fn entry_point(&self) -> u64 {
        self.entry
    }

    fn machine(&self) -> Machine {
        self.machine
    }

    fn width(&self) -> Width {
        self.width
    }

    fn object_type(&self) -> ObjectType {
        self.object_type
    }
}
