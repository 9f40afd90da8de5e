pub mod file;
pub mod program;
pub mod section;

pub use file::FileHeader;
pub use program::{ProgramHeader, ProgramHeader32, ProgramHeader64, Segment};
pub use section::{Section, SectionHeader, SectionHeader32, SectionHeader64};

use crate::codes::{Machine, ObjectType};
use crate::layout::Width;

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the virtual address of the entry point.
    fn entry_point(&self) -> u64;

    /// Returns the target instruction set.
    fn machine(&self) -> Machine;

    /// Returns the address width of the file.
    fn width(&self) -> Width;

    /// Returns the object file type.
    fn object_type(&self) -> ObjectType;

    /// Returns true if this is a 64-bit binary.
    fn is_64(&self) -> bool {
        self.width() == Width::Elf64
    }

    /// Returns true if the binary represents an executable (vs object/lib).
    fn is_executable(&self) -> bool {
        self.object_type().is_executable()
    }
}
