//! Synthetic ELF images for decoder tests.
//!
//! Offsets here are written out from the ELF specification on purpose, rather
//! than taken from the crate's layout tables, so the tests check the decoder
//! against an independent description of the format.

#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder, LittleEndian};

#[derive(Debug, Clone, Copy, Default)]
pub struct Seg {
    pub p_type: u32,
    pub flags: u32,
    pub offset: u64,
    pub vaddr: u64,
    pub paddr: u64,
    pub filesz: u64,
    pub memsz: u64,
    pub align: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sec {
    pub name: u32,
    pub sh_type: u32,
    pub flags: u64,
    pub addr: u64,
    pub offset: u64,
    pub size: u64,
    pub link: u32,
    pub info: u32,
    pub addralign: u64,
    pub entsize: u64,
}

#[derive(Debug, Clone)]
pub struct ElfImage {
    pub is_64: bool,
    pub big_endian: bool,
    pub osabi: u8,
    pub abi_version: u8,
    pub e_type: u16,
    pub machine: u16,
    pub entry: u64,
    pub flags: u32,
    /// Declared entry sizes; `None` uses the structural size.
    pub phentsize: Option<u16>,
    pub shentsize: Option<u16>,
    /// Overrides for the declared counts; `None` uses the table length.
    pub phnum: Option<u16>,
    pub shnum: Option<u16>,
    pub shstrndx: u16,
    pub segments: Vec<Seg>,
    pub sections: Vec<Sec>,
    /// Minimum total image length; the image is zero padded up to it.
    pub file_len: usize,
}

impl Default for ElfImage {
    fn default() -> Self {
        Self {
            is_64: true,
            big_endian: false,
            osabi: 0,
            abi_version: 0,
            e_type: 2,
            machine: 0x3e,
            entry: 0,
            flags: 0,
            phentsize: None,
            shentsize: None,
            phnum: None,
            shnum: None,
            shstrndx: 0,
            segments: Vec::new(),
            sections: Vec::new(),
            file_len: 0,
        }
    }
}

impl ElfImage {
    pub fn elf32() -> Self {
        Self {
            is_64: false,
            machine: 0x03,
            ..Self::default()
        }
    }

    pub fn ehsize(&self) -> usize {
        if self.is_64 { 64 } else { 52 }
    }

    pub fn phentsize(&self) -> usize {
        self.phentsize
            .map(usize::from)
            .unwrap_or(if self.is_64 { 56 } else { 32 })
    }

    pub fn shentsize(&self) -> usize {
        self.shentsize
            .map(usize::from)
            .unwrap_or(if self.is_64 { 64 } else { 40 })
    }

    /// The program header table directly follows the file header.
    pub fn phoff(&self) -> usize {
        if self.segments.is_empty() { 0 } else { self.ehsize() }
    }

    /// The section header table directly follows the program header table.
    pub fn shoff(&self) -> usize {
        if self.sections.is_empty() {
            0
        } else {
            self.ehsize() + self.segments.len() * self.phentsize()
        }
    }

    pub fn tables_end(&self) -> usize {
        self.ehsize()
            + self.segments.len() * self.phentsize()
            + self.sections.len() * self.shentsize()
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.tables_end().max(self.file_len)];
        let mut w = Writer {
            buf: &mut buf,
            big: self.big_endian,
        };

        w.bytes(0, &[0x7f, b'E', b'L', b'F']);
        w.put(4, 1, if self.is_64 { 2 } else { 1 });
        w.put(5, 1, if self.big_endian { 2 } else { 1 });
        w.put(6, 1, 1);
        w.put(7, 1, self.osabi as u64);
        w.put(8, 1, self.abi_version as u64);
        w.put(16, 2, self.e_type as u64);
        w.put(18, 2, self.machine as u64);
        w.put(20, 4, 1);

        let phnum = self.phnum.unwrap_or(self.segments.len() as u16) as u64;
        let shnum = self.shnum.unwrap_or(self.sections.len() as u16) as u64;

        if self.is_64 {
            w.put(24, 8, self.entry);
            w.put(32, 8, self.phoff() as u64);
            w.put(40, 8, self.shoff() as u64);
            w.put(48, 4, self.flags as u64);
            w.put(52, 2, 64);
            w.put(54, 2, self.phentsize() as u64);
            w.put(56, 2, phnum);
            w.put(58, 2, self.shentsize() as u64);
            w.put(60, 2, shnum);
            w.put(62, 2, self.shstrndx as u64);
        } else {
            w.put(24, 4, self.entry);
            w.put(28, 4, self.phoff() as u64);
            w.put(32, 4, self.shoff() as u64);
            w.put(36, 4, self.flags as u64);
            w.put(40, 2, 52);
            w.put(42, 2, self.phentsize() as u64);
            w.put(44, 2, phnum);
            w.put(46, 2, self.shentsize() as u64);
            w.put(48, 2, shnum);
            w.put(50, 2, self.shstrndx as u64);
        }

        for (i, seg) in self.segments.iter().enumerate() {
            let at = self.phoff() + i * self.phentsize();
            if self.is_64 {
                w.put(at, 4, seg.p_type as u64);
                w.put(at + 4, 4, seg.flags as u64);
                w.put(at + 8, 8, seg.offset);
                w.put(at + 16, 8, seg.vaddr);
                w.put(at + 24, 8, seg.paddr);
                w.put(at + 32, 8, seg.filesz);
                w.put(at + 40, 8, seg.memsz);
                w.put(at + 48, 8, seg.align);
            } else {
                w.put(at, 4, seg.p_type as u64);
                w.put(at + 4, 4, seg.offset);
                w.put(at + 8, 4, seg.vaddr);
                w.put(at + 12, 4, seg.paddr);
                w.put(at + 16, 4, seg.filesz);
                w.put(at + 20, 4, seg.memsz);
                w.put(at + 24, 4, seg.flags as u64);
                w.put(at + 28, 4, seg.align);
            }
        }

        for (i, sec) in self.sections.iter().enumerate() {
            let at = self.shoff() + i * self.shentsize();
            if self.is_64 {
                w.put(at, 4, sec.name as u64);
                w.put(at + 4, 4, sec.sh_type as u64);
                w.put(at + 8, 8, sec.flags);
                w.put(at + 16, 8, sec.addr);
                w.put(at + 24, 8, sec.offset);
                w.put(at + 32, 8, sec.size);
                w.put(at + 40, 4, sec.link as u64);
                w.put(at + 44, 4, sec.info as u64);
                w.put(at + 48, 8, sec.addralign);
                w.put(at + 56, 8, sec.entsize);
            } else {
                w.put(at, 4, sec.name as u64);
                w.put(at + 4, 4, sec.sh_type as u64);
                w.put(at + 8, 4, sec.flags);
                w.put(at + 12, 4, sec.addr);
                w.put(at + 16, 4, sec.offset);
                w.put(at + 20, 4, sec.size);
                w.put(at + 24, 4, sec.link as u64);
                w.put(at + 28, 4, sec.info as u64);
                w.put(at + 32, 4, sec.addralign);
                w.put(at + 36, 4, sec.entsize);
            }
        }

        buf
    }
}

struct Writer<'a> {
    buf: &'a mut [u8],
    big: bool,
}

impl Writer<'_> {
    fn put(&mut self, at: usize, len: usize, value: u64) {
        let dst = &mut self.buf[at..at + len];
        if self.big {
            BigEndian::write_uint(dst, value, len);
        } else {
            LittleEndian::write_uint(dst, value, len);
        }
    }

    fn bytes(&mut self, at: usize, bytes: &[u8]) {
        self.buf[at..at + bytes.len()].copy_from_slice(bytes);
    }
}

/// A typical small dynamically linked x86-64 executable layout.
pub fn sample_executable() -> ElfImage {
    ElfImage {
        entry: 0x401040,
        segments: vec![
            Seg {
                p_type: 6, // PHDR
                flags: 4,
                offset: 64,
                vaddr: 0x400040,
                paddr: 0x400040,
                filesz: 56 * 3,
                memsz: 56 * 3,
                align: 8,
            },
            Seg {
                p_type: 1, // LOAD
                flags: 5,
                offset: 0,
                vaddr: 0x400000,
                paddr: 0x400000,
                filesz: 0x800,
                memsz: 0x800,
                align: 0x1000,
            },
            Seg {
                p_type: 0x6474_e551, // GNU_STACK
                flags: 6,
                align: 16,
                ..Seg::default()
            },
        ],
        sections: vec![
            Sec::default(),
            Sec {
                name: 0x1b,
                sh_type: 1, // PROGBITS
                flags: 0x6,
                addr: 0x401000,
                offset: 0x400,
                size: 0x100,
                addralign: 16,
                ..Sec::default()
            },
            Sec {
                name: 0x21,
                sh_type: 8, // NOBITS
                flags: 0x3,
                addr: 0x404000,
                offset: 0x800,
                size: 0x10_0000,
                addralign: 32,
                ..Sec::default()
            },
            Sec {
                name: 0x01,
                sh_type: 3, // STRTAB
                offset: 0x700,
                size: 0x30,
                addralign: 1,
                ..Sec::default()
            },
        ],
        shstrndx: 3,
        file_len: 0x800,
        ..ElfImage::default()
    }
}
