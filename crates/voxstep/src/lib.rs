#![warn(missing_docs)]

//! voxstep - binvox voxel grids to STEP B-rep solid models.
//!
//! Converts a binvox occupancy grid into a STEP (ISO 10303-21) file by
//! building one axis-aligned box per occupied voxel, translating it to
//! its lattice position scaled by the per-axis voxel dimensions,
//! collecting the boxes into a compound, and serializing the compound
//! under a selectable application protocol.
//!
//! # Example
//!
//! ```no_run
//! use voxstep::{convert, Schema, VoxelDims};
//!
//! // Writes bunny_32.stp next to the input.
//! let out = convert("bunny_32.binvox", VoxelDims::uniform(10.0), Schema::Ap203).unwrap();
//! println!("wrote {}", out.display());
//! ```

mod convert;

pub use convert::{build_compound, convert, convert_to, output_path, ConvertError, VoxelDims};

pub use voxstep_binvox::{read_binvox, read_binvox_from_buffer, BinvoxError, VoxelGrid};
pub use voxstep_brep::{BoxSolid, Compound};
pub use voxstep_step::{Schema, StepError, StepExporter};
