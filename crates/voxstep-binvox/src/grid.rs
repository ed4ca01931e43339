//! Dense 3D boolean occupancy grid.

/// A dense voxel occupancy grid with fixed extents.
///
/// Occupancy is immutable once parsed. Cells are indexed `(x, y, z)` with
/// `0 <= x < nx`, `0 <= y < ny`, `0 <= z < nz`.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    nx: usize,
    ny: usize,
    nz: usize,
    translate: [f64; 3],
    scale: f64,
    /// Occupancy in x-major order: index = (x * ny + y) * nz + z.
    data: Vec<bool>,
}

impl VoxelGrid {
    pub(crate) fn new(
        nx: usize,
        ny: usize,
        nz: usize,
        translate: [f64; 3],
        scale: f64,
        data: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(data.len(), nx * ny * nz);
        Self {
            nx,
            ny,
            nz,
            translate,
            scale,
            data,
        }
    }

    /// Grid extents as `(nx, ny, nz)`.
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.nx, self.ny, self.nz)
    }

    /// Normalization translation from the binvox header.
    pub fn translate(&self) -> [f64; 3] {
        self.translate
    }

    /// Normalization scale from the binvox header.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Occupancy of the cell at `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is out of range.
    pub fn get(&self, x: usize, y: usize, z: usize) -> bool {
        assert!(x < self.nx && y < self.ny && z < self.nz);
        self.data[(x * self.ny + y) * self.nz + z]
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Coordinates of all occupied cells in row-major order
    /// (x outermost, then y, then z).
    ///
    /// The order is stable for identical grids, which keeps downstream
    /// shape construction deterministic.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let (nx, ny, nz) = (self.nx, self.ny, self.nz);
        (0..nx)
            .flat_map(move |x| (0..ny).flat_map(move |y| (0..nz).map(move |z| (x, y, z))))
            .filter(|&(x, y, z)| self.get(x, y, z))
    }
}
