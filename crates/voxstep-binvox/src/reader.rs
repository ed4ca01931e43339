//! binvox file reader: header parse + run-length decode.
//!
//! The format is an ASCII header (`#binvox 1`, `dim`, optional `translate`
//! and `scale`, then `data`) followed by byte pairs `(value, run_length)`.
//! Voxels are stored with x varying slowest, then z, then y fastest; the
//! grid is converted to `(x, y, z)` indexing on load.

use std::path::Path;

use crate::error::BinvoxError;
use crate::grid::VoxelGrid;

/// Read a binvox file from a path.
pub fn read_binvox(path: impl AsRef<Path>) -> Result<VoxelGrid, BinvoxError> {
    let data = std::fs::read(path)?;
    read_binvox_from_buffer(&data)
}

/// Read a binvox file from a byte buffer.
pub fn read_binvox_from_buffer(data: &[u8]) -> Result<VoxelGrid, BinvoxError> {
    let mut header = HeaderCursor::new(data);

    let magic = header.next_line()?;
    if !magic.starts_with("#binvox") {
        return Err(BinvoxError::header(1, "missing #binvox magic"));
    }

    // The dim line lists the extents in storage-axis order (x, z, y).
    let mut dims: Option<(usize, usize, usize)> = None;
    let mut translate = [0.0; 3];
    let mut scale = 1.0;

    loop {
        let line_no = header.line;
        let line = header.next_line()?;
        let mut words = line.split_ascii_whitespace();
        match words.next() {
            Some("dim") => {
                let d: Vec<usize> = words
                    .map(|w| {
                        w.parse()
                            .map_err(|_| BinvoxError::header(line_no, format!("bad extent: {w}")))
                    })
                    .collect::<Result<_, _>>()?;
                if d.len() != 3 {
                    return Err(BinvoxError::header(line_no, "dim expects three extents"));
                }
                dims = Some((d[0], d[1], d[2]));
            }
            Some("translate") => {
                let t: Vec<f64> = words
                    .map(|w| {
                        w.parse().map_err(|_| {
                            BinvoxError::header(line_no, format!("bad translation: {w}"))
                        })
                    })
                    .collect::<Result<_, _>>()?;
                if t.len() != 3 {
                    return Err(BinvoxError::header(line_no, "translate expects three values"));
                }
                translate = [t[0], t[1], t[2]];
            }
            Some("scale") => {
                let w = words
                    .next()
                    .ok_or_else(|| BinvoxError::header(line_no, "scale expects a value"))?;
                scale = w
                    .parse()
                    .map_err(|_| BinvoxError::header(line_no, format!("bad scale: {w}")))?;
            }
            Some("data") => break,
            Some(other) => {
                return Err(BinvoxError::header(
                    line_no,
                    format!("unexpected keyword: {other}"),
                ));
            }
            None => continue,
        }
    }

    let (nx, nz, ny) =
        dims.ok_or_else(|| BinvoxError::header(header.line, "header has no dim line"))?;
    let total = nx * ny * nz;
    let mut grid = vec![false; total];

    // Decode the RLE payload into (x, y, z) indexing. Stored index i maps
    // to x = i / (nz*ny), z = (i % (nz*ny)) / ny, y = i % ny.
    let payload = header.rest();
    let mut filled = 0usize;
    for pair in payload.chunks(2) {
        let [value, run] = pair else {
            return Err(BinvoxError::data("dangling value byte without run length"));
        };
        let run = *run as usize;
        if run == 0 {
            return Err(BinvoxError::data("zero run length"));
        }
        if filled + run > total {
            return Err(BinvoxError::data(format!(
                "run-length data overruns grid of {total} cells"
            )));
        }
        if *value != 0 {
            for i in filled..filled + run {
                let x = i / (nz * ny);
                let z = (i % (nz * ny)) / ny;
                let y = i % ny;
                grid[(x * ny + y) * nz + z] = true;
            }
        }
        filled += run;
    }

    if filled != total {
        return Err(BinvoxError::Truncated {
            expected: total,
            actual: filled,
        });
    }

    Ok(VoxelGrid::new(nx, ny, nz, translate, scale, grid))
}

/// Cursor over the ASCII header portion of a binvox buffer.
struct HeaderCursor<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> HeaderCursor<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, BinvoxError> {
        if self.pos >= self.input.len() {
            return Err(BinvoxError::header(self.line, "unexpected end of header"));
        }
        let start = self.pos;
        while self.pos < self.input.len() && self.input[self.pos] != b'\n' {
            self.pos += 1;
        }
        let raw = &self.input[start..self.pos];
        if self.pos < self.input.len() {
            self.pos += 1; // consume the newline
        }
        self.line += 1;
        std::str::from_utf8(raw)
            .map(str::trim_end)
            .map_err(|_| BinvoxError::header(self.line - 1, "non-ASCII header line"))
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binvox_bytes(dim_line: &str, runs: &[(u8, u8)]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"#binvox 1\n");
        bytes.extend_from_slice(dim_line.as_bytes());
        bytes.extend_from_slice(b"\ntranslate 0 0 0\nscale 1\ndata\n");
        for &(value, run) in runs {
            bytes.push(value);
            bytes.push(run);
        }
        bytes
    }

    #[test]
    fn test_read_empty_grid() {
        let bytes = binvox_bytes("dim 2 2 2", &[(0, 8)]);
        let grid = read_binvox_from_buffer(&bytes).unwrap();
        assert_eq!(grid.dims(), (2, 2, 2));
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn test_read_full_grid() {
        let bytes = binvox_bytes("dim 2 2 2", &[(1, 8)]);
        let grid = read_binvox_from_buffer(&bytes).unwrap();
        assert_eq!(grid.occupied_count(), 8);
    }

    #[test]
    fn test_xzy_storage_order() {
        // dim line is (x, z, y): extents nx=2, nz=3, ny=4.
        // Stored index 4 has x=0, z=1, y=0, so cell (0, 0, 1) is occupied.
        let bytes = binvox_bytes("dim 2 3 4", &[(0, 4), (1, 1), (0, 19)]);
        let grid = read_binvox_from_buffer(&bytes).unwrap();
        assert_eq!(grid.dims(), (2, 4, 3));
        assert_eq!(grid.occupied_count(), 1);
        assert!(grid.get(0, 0, 1));
    }

    #[test]
    fn test_header_metadata() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"#binvox 1\ndim 1 1 1\ntranslate -0.5 1.5 2.0\nscale 41.5\ndata\n");
        bytes.extend_from_slice(&[1, 1]);
        let grid = read_binvox_from_buffer(&bytes).unwrap();
        assert_eq!(grid.translate(), [-0.5, 1.5, 2.0]);
        assert!((grid.scale() - 41.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_magic() {
        let result = read_binvox_from_buffer(b"#notvox 1\ndim 1 1 1\ndata\n\x01\x01");
        assert!(matches!(result, Err(BinvoxError::Header { line: 1, .. })));
    }

    #[test]
    fn test_missing_dim_line() {
        let result = read_binvox_from_buffer(b"#binvox 1\nscale 1\ndata\n");
        assert!(matches!(result, Err(BinvoxError::Header { .. })));
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = binvox_bytes("dim 2 2 2", &[(1, 4)]);
        let result = read_binvox_from_buffer(&bytes);
        assert!(matches!(
            result,
            Err(BinvoxError::Truncated {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_overlong_payload() {
        let bytes = binvox_bytes("dim 2 2 2", &[(1, 9)]);
        let result = read_binvox_from_buffer(&bytes);
        assert!(matches!(result, Err(BinvoxError::Data(_))));
    }

    #[test]
    fn test_dangling_value_byte() {
        let mut bytes = binvox_bytes("dim 2 2 2", &[(1, 7)]);
        bytes.push(1);
        let result = read_binvox_from_buffer(&bytes);
        assert!(matches!(result, Err(BinvoxError::Data(_))));
    }
}
