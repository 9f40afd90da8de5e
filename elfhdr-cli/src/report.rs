//! Rendering of decoded headers as text tables or JSON.

use colored::Colorize;
use elfhdr_core::{Binary, FileHeader, ProgramHeader, Section, SectionHeader, Segment};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::Command;

#[derive(Serialize)]
pub struct Report {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_header: Option<FileHeaderReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<SegmentRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionRow>>,
}

impl Report {
    pub fn new(bin: &Binary, command: Command) -> Self {
        let (header, segments, sections) = match command {
            Command::Header => (true, false, false),
            Command::Segments => (false, true, false),
            Command::Sections => (false, false, true),
            Command::All => (true, true, true),
        };

        let headers = &bin.headers;
        Self {
            path: bin.path.clone(),
            file_header: header.then(|| FileHeaderReport::new(headers.file_header())),
            segments: segments.then(|| {
                headers
                    .program_headers()
                    .iter()
                    .map(SegmentRow::new)
                    .collect()
            }),
            sections: sections.then(|| {
                headers
                    .section_headers()
                    .iter()
                    .enumerate()
                    .map(|(index, sh)| SectionRow::new(index, sh))
                    .collect()
            }),
        }
    }
}

#[derive(Serialize)]
pub struct FileHeaderReport {
    pub magic: String,
    pub class: String,
    pub data: String,
    pub ident_version: u8,
    pub abi: String,
    pub abi_version: u8,
    #[serde(rename = "type")]
    pub object_type: String,
    pub machine: String,
    pub version: String,
    pub entry: String,
    pub phoff: String,
    pub shoff: String,
    pub flags: String,
    pub ehsize: u16,
    pub phentsize: u16,
    pub phnum: u16,
    pub shentsize: u16,
    pub shnum: u16,
    pub shstrndx: u16,
}

impl FileHeaderReport {
    fn new(fh: &FileHeader) -> Self {
        Self {
            magic: fh
                .magic
                .iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" "),
            class: fh.width.to_string(),
            data: format!("2's complement, {}", fh.byte_order),
            ident_version: fh.ident_version,
            abi: fh.abi.to_string(),
            abi_version: fh.abi_version,
            object_type: fh.object_type.to_string(),
            machine: fh.machine.to_string(),
            version: format!("{:#x}", fh.version),
            entry: format!("{:#x}", fh.entry),
            phoff: format!("{:#x}", fh.phoff),
            shoff: format!("{:#x}", fh.shoff),
            flags: format!("{:#x}", fh.flags),
            ehsize: fh.ehsize,
            phentsize: fh.phentsize,
            phnum: fh.phnum,
            shentsize: fh.shentsize,
            shnum: fh.shnum,
            shstrndx: fh.shstrndx,
        }
    }

    fn lines(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Magic:", self.magic.clone()),
            ("Class:", self.class.clone()),
            ("Data:", self.data.clone()),
            ("Version:", self.ident_version.to_string()),
            ("OS/ABI:", self.abi.clone()),
            ("ABI Version:", self.abi_version.to_string()),
            ("Type:", self.object_type.clone()),
            ("Machine:", self.machine.clone()),
            ("Version:", self.version.clone()),
            ("Entry point address:", self.entry.clone()),
            (
                "Start of program headers:",
                format!("{} (bytes into file)", self.phoff),
            ),
            (
                "Start of section headers:",
                format!("{} (bytes into file)", self.shoff),
            ),
            ("Flags:", self.flags.clone()),
            ("Size of this header:", format!("{} (bytes)", self.ehsize)),
            (
                "Size of program headers:",
                format!("{} (bytes)", self.phentsize),
            ),
            ("Number of program headers:", self.phnum.to_string()),
            (
                "Size of section headers:",
                format!("{} (bytes)", self.shentsize),
            ),
            ("Number of section headers:", self.shnum.to_string()),
            ("Section header string table index:", self.shstrndx.to_string()),
        ]
    }
}

#[derive(Tabled, Serialize)]
pub struct SegmentRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub kind: String,
    #[tabled(rename = "Offset")]
    pub offset: String,
    #[tabled(rename = "VirtAddr")]
    pub vaddr: String,
    #[tabled(rename = "PhysAddr")]
    pub paddr: String,
    #[tabled(rename = "FileSiz")]
    pub filesz: String,
    #[tabled(rename = "MemSiz")]
    pub memsz: String,
    #[tabled(rename = "Flg")]
    pub flags: String,
    #[tabled(rename = "Align")]
    pub align: String,
}

impl SegmentRow {
    fn new(ph: &ProgramHeader) -> Self {
        Self {
            kind: ph.segment_type().to_string(),
            offset: format!("{:#x}", ph.file_offset()),
            vaddr: format!("{:#x}", ph.virtual_address()),
            paddr: format!("{:#x}", ph.physical_address()),
            filesz: format!("{:#x}", ph.file_size()),
            memsz: format!("{:#x}", ph.memory_size()),
            flags: ph.permissions().to_string(),
            align: format!("{:#x}", ph.alignment()),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct SectionRow {
    #[tabled(rename = "Nr")]
    pub index: usize,
    #[tabled(rename = "Name")]
    pub name_offset: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub kind: String,
    #[tabled(rename = "Address")]
    pub addr: String,
    #[tabled(rename = "Off")]
    pub offset: String,
    #[tabled(rename = "Size")]
    pub size: String,
    #[tabled(rename = "ES")]
    pub entsize: String,
    #[tabled(rename = "Flg")]
    pub flags: String,
    #[tabled(rename = "Lk")]
    pub link: u32,
    #[tabled(rename = "Inf")]
    pub info: u32,
    #[tabled(rename = "Al")]
    pub align: String,
}

impl SectionRow {
    fn new(index: usize, sh: &SectionHeader) -> Self {
        Self {
            index,
            // Names stay unresolved: only the offset into the string table is known.
            name_offset: format!("{:#x}", sh.name_offset()),
            kind: sh.section_type().to_string(),
            addr: format!("{:#x}", sh.address()),
            offset: format!("{:#x}", sh.file_offset()),
            size: format!("{:#x}", sh.size()),
            entsize: format!("{:#x}", sh.entry_size()),
            flags: sh.attributes().to_string(),
            link: sh.link(),
            info: sh.info(),
            align: format!("{:#x}", sh.alignment()),
        }
    }
}

pub fn print_file_header(header: &FileHeaderReport) {
    println!("{}", "ELF Header:".bold());
    for (label, value) in header.lines() {
        println!("  {:<36}{}", label, value);
    }
    println!();
}

pub fn print_table<T: Tabled>(title: &str, rows: &[T]) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", title.bold());
    println!("{table}");
    println!();
}
