//! CLI argument parsing using clap.

use arcx_core::ContainerKind;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Directory containing the pdfium shared library
    #[arg(long, global = true, value_name = "DIR")]
    pub pdfium_lib: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a container needs a password
    Probe(ProbeArgs),
    /// Extract archive contents or render PDF pages
    Extract(ExtractArgs),
    /// Generate shell completion scripts
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args)]
pub struct ProbeArgs {
    /// Path to the archive or PDF file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Container format (zip, rar, 7z, pdf); detected when omitted
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ContainerKind>,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the archive or PDF file
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output directory (default: current directory)
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Container format (zip, rar, 7z, pdf); detected when omitted
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<ContainerKind>,

    /// Password for encrypted containers
    #[arg(short, long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// JPEG quality for PDF pages (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Do not apply unix permissions stored in ZIP archives
    #[arg(long)]
    pub no_preserve_permissions: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extract_with_format() {
        let cli = Cli::try_parse_from([
            "arcx", "extract", "doc.bin", "out", "--format", "pdf", "--quality", "90",
        ])
        .unwrap();
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract command");
        };
        assert_eq!(args.format, Some(ContainerKind::Pdf));
        assert_eq!(args.quality, Some(90));
    }

    #[test]
    fn test_quality_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["arcx", "extract", "a.pdf", "--quality", "0"]).is_err());
        assert!(Cli::try_parse_from(["arcx", "extract", "a.pdf", "--quality", "101"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["arcx", "probe", "a.tar", "--format", "tar"]).is_err());
    }
}
