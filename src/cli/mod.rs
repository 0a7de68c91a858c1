use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use aerovis::binary::ElementType;

mod convert;
mod inspect;
mod streamlines;
mod validate;

/// aerovis - ParaView exports to browser renderer assets
#[derive(Parser)]
#[command(name = "aerovis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Element type of a binary array file
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ElementTypeArg {
    /// 32-bit float (positions, scalars)
    Float32,
    /// 32-bit signed integer (indices)
    Int32,
}

impl From<ElementTypeArg> for ElementType {
    fn from(arg: ElementTypeArg) -> Self {
        match arg {
            ElementTypeArg::Float32 => ElementType::Float32,
            ElementTypeArg::Int32 => ElementType::Int32,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert the cases described in a TOML configuration file
    Convert {
        /// Case configuration file
        #[arg(short = 'c', long, value_name = "FILE", default_value = "aerovis.toml")]
        config: PathBuf,

        /// Case to convert (repeatable; defaults to the `cases` list in the file)
        #[arg(long = "case", value_name = "NAME")]
        cases: Vec<String>,
    },

    /// Reconstruct streamlines from a ParaView CSV export
    Streamlines {
        /// Input CSV table
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output JSON path (defaults to the input name with a .json extension)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Column exported as the Values channel
        #[arg(long, default_value = "Mach")]
        value_field: String,

        /// Match seeds after rounding to this many decimals instead of exactly
        #[arg(long, value_name = "DECIMALS")]
        quantize: Option<u32>,

        /// Keep only the first N streamlines
        #[arg(long, value_name = "N")]
        max_lines: Option<usize>,

        /// Warn about consecutive samples further apart than this
        #[arg(long, value_name = "DISTANCE")]
        continuity_tolerance: Option<f64>,

        /// Also write <OUTPUT>.summary.json
        #[arg(long)]
        summary: bool,
    },

    /// Display the contents of a binary array file
    Inspect {
        /// Binary array file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Element type of the file
        #[arg(short = 't', long = "type", value_enum)]
        element_type: ElementTypeArg,

        /// Values per tuple (3 for positions and triangles)
        #[arg(short = 'n', long, default_value = "1")]
        components: usize,

        /// Number of tuples to print
        #[arg(long, default_value = "5")]
        head: usize,
    },

    /// Validate a streamline JSON document
    Validate {
        /// Streamline JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Warn about consecutive samples further apart than this
        #[arg(long, value_name = "DISTANCE")]
        continuity_tolerance: Option<f64>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert { config, cases } => convert::run(config, cases),
        Commands::Streamlines {
            input,
            output,
            value_field,
            quantize,
            max_lines,
            continuity_tolerance,
            summary,
        } => streamlines::run(
            input,
            output,
            value_field,
            quantize,
            max_lines,
            continuity_tolerance,
            summary,
        ),
        Commands::Inspect {
            file,
            element_type,
            components,
            head,
        } => inspect::run(file, element_type.into(), components, head),
        Commands::Validate {
            file,
            continuity_tolerance,
        } => validate::run(file, continuity_tolerance),
    }
}
