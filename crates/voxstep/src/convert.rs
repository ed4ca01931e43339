//! The binvox → STEP conversion pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;
use voxstep_binvox::{read_binvox, BinvoxError, VoxelGrid};
use voxstep_brep::{BoxSolid, Compound};
use voxstep_step::{Schema, StepError, StepExporter};

/// Physical size of one voxel along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelDims {
    /// Box size and lattice spacing along X.
    pub length: f64,
    /// Box size and lattice spacing along Y.
    pub width: f64,
    /// Box size and lattice spacing along Z.
    pub height: f64,
}

impl VoxelDims {
    /// Per-axis voxel dimensions.
    pub fn new(length: f64, width: f64, height: f64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }

    /// The same dimension along all three axes.
    pub fn uniform(size: f64) -> Self {
        Self::new(size, size, size)
    }

    fn validate(&self) -> Result<(), ConvertError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.length) && ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(ConvertError::InvalidDims {
                length: self.length,
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Errors that can occur during a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Voxel dimensions must be finite and strictly positive.
    #[error("invalid voxel dimensions {length} x {width} x {height}: all must be finite and positive")]
    InvalidDims {
        /// Requested size along X.
        length: f64,
        /// Requested size along Y.
        width: f64,
        /// Requested size along Z.
        height: f64,
    },

    /// The input file could not be read or parsed.
    #[error(transparent)]
    Binvox(#[from] BinvoxError),

    /// The STEP writer failed.
    #[error(transparent)]
    Step(#[from] StepError),
}

/// Build the compound of placed boxes for a grid: one box of
/// `(length, width, height)` per occupied cell, with its origin corner at
/// `(x·length, y·width, z·height)`, in the grid's deterministic scan
/// order.
pub fn build_compound(grid: &VoxelGrid, dims: VoxelDims) -> Compound {
    let mut compound = Compound::new();
    for (x, y, z) in grid.occupied() {
        let solid = BoxSolid::new(dims.length, dims.width, dims.height).translated(
            x as f64 * dims.length,
            y as f64 * dims.width,
            z as f64 * dims.height,
        );
        compound.push(solid);
    }
    compound
}

/// Derive the output path for an input file.
///
/// A final `.binvox` extension is replaced by `.stp`; any other name gets
/// `.stp` appended so the stem is never corrupted.
pub fn output_path(input: &Path) -> PathBuf {
    match input.extension().and_then(|ext| ext.to_str()) {
        Some("binvox") => input.with_extension("stp"),
        _ => {
            let mut name = input.as_os_str().to_owned();
            name.push(".stp");
            PathBuf::from(name)
        }
    }
}

/// Convert a binvox file to a STEP file written next to the input.
///
/// The output path is derived via [`output_path`]; returns the path of
/// the written file. The whole conversion is one synchronous pass; any
/// failure is fatal to the call and no partial cleanup is performed.
pub fn convert(
    input: impl AsRef<Path>,
    dims: VoxelDims,
    schema: Schema,
) -> Result<PathBuf, ConvertError> {
    let input = input.as_ref();
    convert_to(input, output_path(input), dims, schema)
}

/// Convert a binvox file to a STEP file at an explicit output path.
///
/// Returns the path of the written file.
pub fn convert_to(
    input: impl AsRef<Path>,
    output: impl Into<PathBuf>,
    dims: VoxelDims,
    schema: Schema,
) -> Result<PathBuf, ConvertError> {
    dims.validate()?;

    let grid = read_binvox(input)?;
    let compound = build_compound(&grid, dims);

    let output = output.into();
    StepExporter::new(schema).transfer(&compound).write(&output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxstep_binvox::read_binvox_from_buffer;

    fn two_voxel_grid() -> VoxelGrid {
        // 2x1x1 grid (dim line is x, z, y), both cells occupied.
        read_binvox_from_buffer(b"#binvox 1\ndim 2 1 1\ndata\n\x01\x02").unwrap()
    }

    #[test]
    fn test_build_compound_one_box_per_cell() {
        let grid = two_voxel_grid();
        let compound = build_compound(&grid, VoxelDims::uniform(1.0));
        assert_eq!(compound.len(), grid.occupied_count());
    }

    #[test]
    fn test_build_compound_scales_lattice_spacing() {
        let grid = two_voxel_grid();
        let compound = build_compound(&grid, VoxelDims::new(10.0, 20.0, 30.0));
        let corner = compound.solids()[1].vertices()[0];
        assert!((corner.x - 10.0).abs() < 1e-12);
        assert!(corner.y.abs() < 1e-12);
        assert!(corner.z.abs() < 1e-12);
    }

    #[test]
    fn test_output_path_replaces_binvox_extension() {
        assert_eq!(
            output_path(Path::new("bunny_32.binvox")),
            PathBuf::from("bunny_32.stp")
        );
        assert_eq!(
            output_path(Path::new("models/chair.binvox")),
            PathBuf::from("models/chair.stp")
        );
    }

    #[test]
    fn test_output_path_preserves_other_names() {
        assert_eq!(
            output_path(Path::new("scan.raw")),
            PathBuf::from("scan.raw.stp")
        );
        assert_eq!(output_path(Path::new("scan")), PathBuf::from("scan.stp"));
    }

    #[test]
    fn test_dims_validation() {
        assert!(VoxelDims::uniform(10.0).validate().is_ok());
        for bad in [
            VoxelDims::new(0.0, 1.0, 1.0),
            VoxelDims::new(1.0, -2.0, 1.0),
            VoxelDims::new(1.0, 1.0, f64::NAN),
            VoxelDims::new(f64::INFINITY, 1.0, 1.0),
        ] {
            assert!(matches!(
                bad.validate(),
                Err(ConvertError::InvalidDims { .. })
            ));
        }
    }
}
