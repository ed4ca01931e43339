//! voxstep CLI - binvox to STEP converter
//!
//! Converts a binvox voxel grid into a STEP B-rep model, one box per
//! occupied voxel, written next to the input file.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use voxstep::{convert, convert_to, Schema, VoxelDims};

#[derive(Parser)]
#[command(name = "voxstep")]
#[command(about = "Convert binvox voxel grids to STEP B-rep models", long_about = None)]
struct Cli {
    /// Input binvox file
    input: PathBuf,

    /// Physical size of one voxel along X
    #[arg(long)]
    length: f64,

    /// Physical size of one voxel along Y
    #[arg(long)]
    width: f64,

    /// Physical size of one voxel along Z
    #[arg(long)]
    height: f64,

    /// STEP application protocol: AP203, AP214IS, or AP242DIS
    #[arg(long, default_value = "AP203")]
    protocol: String,

    /// Output STEP file (default: input with a .stp extension)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let schema: Schema = cli.protocol.parse()?;
    let dims = VoxelDims::new(cli.length, cli.width, cli.height);

    let output = match cli.output {
        Some(output) => convert_to(&cli.input, output, dims, schema)?,
        None => convert(&cli.input, dims, schema)?,
    };
    println!("Exported STEP to {}", output.display());

    Ok(())
}
