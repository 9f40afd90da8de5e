mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use elfhdr_core::Binary;

/// readelf-style ELF header inspection
#[derive(Parser)]
#[command(
    name = "elfhdr",
    about = "Inspect the header region of ELF files (file header, segments and sections)",
    version,
    author
)]
struct Cli {
    /// Path to binary file
    #[arg(required = true)]
    path: std::path::PathBuf,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Show the ELF file header
    Header,
    /// List program headers (segments)
    Segments,
    /// List section headers
    Sections,
    /// Show everything
    All,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!(
        "{:?} on {} (json: {})",
        cli.command,
        cli.path.display(),
        cli.json
    );

    let bin = Binary::open(&cli.path)?;
    let report = report::Report::new(&bin, cli.command);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(header) = &report.file_header {
        report::print_file_header(header);
    }

    if let Some(segments) = &report.segments {
        if segments.is_empty() {
            println!("No program headers found (relocatable or core-less object).");
        } else {
            report::print_table("Program Headers", segments);
        }
    }

    if let Some(sections) = &report.sections {
        if sections.is_empty() {
            println!("No sections found (possibly stripped binary).");
        } else {
            report::print_table("Section Headers", sections);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["elfhdr", "/bin/true", "segments", "--json"]).unwrap();
        assert_eq!(cli.command, Command::Segments);
        assert!(cli.json);
        assert_eq!(format!("{:?}", cli.command), "Segments");
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["elfhdr", "/bin/true"]).is_err());
    }
}
