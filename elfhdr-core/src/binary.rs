use crate::decode::ElfHeaders;
use crate::error::DecodeError;
use crate::header::{FileHeader, Header, ProgramHeader, Segment};
use anyhow::Context;
use anyhow::Result;
use std::io::Read;

/// An ELF file read from disk together with its decoded header region.
pub struct Binary {
    pub path: String,
    pub headers: ElfHeaders,
    pub is_stripped: bool,
}

impl Binary {
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::info!("Read {} bytes from {}", buf.len(), path.display());

        Self::from_bytes(path.display().to_string(), &buf)
            .with_context(|| format!("{} is not a parseable ELF file", path.display()))
    }

    /// Decodes an in-memory image. `path` is only used for reporting.
    pub fn from_bytes(path: impl Into<String>, buf: &[u8]) -> Result<Self, DecodeError> {
        let headers = ElfHeaders::parse(buf)?;
        let header = headers.file_header();
        log::debug!(
            "{} {} {}, machine {}",
            header.width,
            header.byte_order,
            header.object_type,
            header.machine
        );

        let stripped = headers.section_headers().is_empty();
        if stripped {
            log::warn!("No section header table (stripped binary)");
        } else {
            log::info!("Has {} section headers", headers.section_headers().len());
        }

        if headers.program_headers().is_empty() {
            log::warn!("No program header table; file is not loadable");
        } else {
            log::info!("Has {} program headers", headers.program_headers().len());
        }

        Ok(Self {
            path: path.into(),
            headers,
            is_stripped: stripped,
        })
    }

    pub fn header(&self) -> &FileHeader {
        self.headers.file_header()
    }

    pub fn get_entry_offset(&self) -> u64 {
        self.header().entry_point()
    }

    /// `PT_LOAD` segments in table order.
    pub fn loadable_segments(&self) -> impl Iterator<Item = &ProgramHeader> {
        self.headers
            .program_headers()
            .iter()
            .filter(|ph| ph.is_load())
    }
}
