//! Bit-flag fields: segment permissions (`p_flags`) and section attributes
//! (`sh_flags`).
//!
//! Both are split into the flags we recognise and whatever bits are left over.
//! The leftover bits are kept, never dropped, so [`raw`](SectionAttributes::raw)
//! always reproduces the field.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Recognised `p_flags` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SegmentFlags: u32 {
        const EXECUTE = 0x1;
        const WRITE = 0x2;
        const READ = 0x4;
    }
}

bitflags! {
    /// Recognised `sh_flags` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionFlags: u64 {
        const WRITE = 0x1;
        const ALLOC = 0x2;
        const EXECINSTR = 0x4;
        const MERGE = 0x10;
        const STRINGS = 0x20;
        const INFO_LINK = 0x40;
        const LINK_ORDER = 0x80;
        const OS_NONCONFORMING = 0x100;
        const GROUP = 0x200;
        const TLS = 0x400;
        const COMPRESSED = 0x800;
    }
}

/// Segment permissions: recognised flags plus unrecognised bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentPermissions {
    pub flags: SegmentFlags,
    pub unknown: u32,
}

impl SegmentPermissions {
    pub fn raw(&self) -> u32 {
        self.flags.bits() | self.unknown
    }

    pub fn is_readable(&self) -> bool {
        self.flags.contains(SegmentFlags::READ)
    }

    pub fn is_writable(&self) -> bool {
        self.flags.contains(SegmentFlags::WRITE)
    }

    pub fn is_executable(&self) -> bool {
        self.flags.contains(SegmentFlags::EXECUTE)
    }
}

impl From<u32> for SegmentPermissions {
    fn from(raw: u32) -> Self {
        let flags = SegmentFlags::from_bits_truncate(raw);
        Self {
            flags,
            unknown: raw & !flags.bits(),
        }
    }
}

/// readelf style, e.g. `R E` or `RW ` followed by any unknown bits in hex.
impl fmt::Display for SegmentPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |flag, c| if self.flags.contains(flag) { c } else { ' ' };
        write!(
            f,
            "{}{}{}",
            bit(SegmentFlags::READ, 'R'),
            bit(SegmentFlags::WRITE, 'W'),
            bit(SegmentFlags::EXECUTE, 'E')
        )?;
        if self.unknown != 0 {
            write!(f, " +{:#x}", self.unknown)?;
        }
        Ok(())
    }
}

/// Section attributes: recognised flags plus unrecognised bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionAttributes {
    pub flags: SectionFlags,
    pub unknown: u64,
}

impl SectionAttributes {
    pub fn raw(&self) -> u64 {
        self.flags.bits() | self.unknown
    }

    pub fn contains(&self, flag: SectionFlags) -> bool {
        self.flags.contains(flag)
    }
}

impl From<u64> for SectionAttributes {
    fn from(raw: u64) -> Self {
        let flags = SectionFlags::from_bits_truncate(raw);
        Self {
            flags,
            unknown: raw & !flags.bits(),
        }
    }
}

const SECTION_KEYS: [(SectionFlags, char); 11] = [
    (SectionFlags::WRITE, 'W'),
    (SectionFlags::ALLOC, 'A'),
    (SectionFlags::EXECINSTR, 'X'),
    (SectionFlags::MERGE, 'M'),
    (SectionFlags::STRINGS, 'S'),
    (SectionFlags::INFO_LINK, 'I'),
    (SectionFlags::LINK_ORDER, 'L'),
    (SectionFlags::OS_NONCONFORMING, 'O'),
    (SectionFlags::GROUP, 'G'),
    (SectionFlags::TLS, 'T'),
    (SectionFlags::COMPRESSED, 'C'),
];

/// readelf key letters, e.g. `AX`, with unknown bits appended in hex.
impl fmt::Display for SectionAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, key) in SECTION_KEYS {
            if self.flags.contains(flag) {
                write!(f, "{key}")?;
            }
        }
        if self.unknown != 0 {
            write!(f, "+{:#x}", self.unknown)?;
        }
        Ok(())
    }
}
