//! # aerovis
//!
//! Command-line front end for converting ParaView exports into renderer
//! assets.
//!
//! ## Usage
//!
//! ```bash
//! # Convert every case listed in a configuration file
//! aerovis convert --config aerovis.toml
//!
//! # Reconstruct one streamline table
//! aerovis streamlines vortex_streamlines_5000.csv vortex.json --max-lines 2000
//!
//! # Look at a written array
//! aerovis inspect wing/vertices.bin --type float32 --components 3
//!
//! # Check a streamline document
//! aerovis validate vortex.json --continuity-tolerance 0.05
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
