#![warn(missing_docs)]

//! binvox voxel grid reading for voxstep.
//!
//! Parses binvox files (a dense 3D boolean occupancy grid with an ASCII
//! header and a run-length-encoded payload) into a [`VoxelGrid`] with
//! deterministic enumeration of occupied cells.
//!
//! # Example
//!
//! ```no_run
//! use voxstep_binvox::read_binvox;
//!
//! let grid = read_binvox("chair.binvox").unwrap();
//! for (x, y, z) in grid.occupied() {
//!     println!("occupied voxel at ({x}, {y}, {z})");
//! }
//! ```

mod error;
mod grid;
mod reader;

pub use error::BinvoxError;
pub use grid::VoxelGrid;
pub use reader::{read_binvox, read_binvox_from_buffer};
