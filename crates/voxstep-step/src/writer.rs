//! STEP writer: serializes a compound of box solids to Part 21 text.
//!
//! Each box becomes one MANIFOLD_SOLID_BREP entity graph (points,
//! vertices, lines, edge curves, oriented edges, loops, planes, faces,
//! closed shell); the compound is a single SHAPE_REPRESENTATION listing
//! every solid. Units are millimetres.

use std::collections::HashMap;
use std::path::Path;

use voxstep_brep::{BoxSolid, Compound};
use voxstep_math::{Point3, Vec3};

use crate::error::StepError;
use crate::schema::Schema;

/// A configured STEP export session.
///
/// The session advances Configured → Transferred → Written, each state
/// reachable only in sequence: [`StepExporter::transfer`] consumes the
/// configured session, and [`TransferredExporter::write`] consumes the
/// transferred one. There is no retry, no rollback, and no way to add
/// shapes after transfer.
#[derive(Debug)]
pub struct StepExporter {
    schema: Schema,
}

impl StepExporter {
    /// Configure a session for the given application protocol.
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Transfer the compound into the session as a single top-level
    /// shape, serializing its full entity graph.
    pub fn transfer(self, compound: &Compound) -> TransferredExporter {
        let mut b = EntityBuilder::new();

        let ctx = emit_contexts(&mut b, self.schema);

        // The representation always carries an origin placement, so an
        // empty compound still yields a valid (empty-geometry) file.
        let origin_pt = emit_point(&mut b, &Point3::origin());
        let axis = emit_direction(&mut b, &Vec3::z());
        let ref_dir = emit_direction(&mut b, &Vec3::x());
        let origin = b.add(format!(
            "AXIS2_PLACEMENT_3D('',#{origin_pt},#{axis},#{ref_dir})"
        ));

        let mut items = vec![origin];
        for solid in compound.solids() {
            items.push(emit_solid(&mut b, solid));
        }

        emit_product_structure(&mut b, &ctx, &items);

        TransferredExporter {
            schema: self.schema,
            data: b.body,
        }
    }
}

/// An export session holding a fully transferred compound, ready to write.
#[derive(Debug)]
pub struct TransferredExporter {
    schema: Schema,
    data: String,
}

impl TransferredExporter {
    /// Write the STEP file to `path`.
    ///
    /// Fails if the underlying write does; no partial-output cleanup is
    /// attempted.
    pub fn write(self, path: impl AsRef<Path>) -> Result<(), StepError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("model.stp");
        let contents = self.render(file_name);
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize the STEP file to a string.
    pub fn write_to_buffer(self) -> Result<String, StepError> {
        Ok(self.render("model.stp"))
    }

    fn render(&self, file_name: &str) -> String {
        format!(
            "ISO-10303-21;\n\
             HEADER;\n\
             FILE_DESCRIPTION(('voxstep compound shape'),'2;1');\n\
             FILE_NAME('{file_name}','',('voxstep'),('voxstep'),'','','');\n\
             FILE_SCHEMA(('{schema}'));\n\
             ENDSEC;\n\
             DATA;\n\
             {data}\
             ENDSEC;\n\
             END-ISO-10303-21;\n",
            file_name = file_name,
            schema = self.schema.file_schema(),
            data = self.data,
        )
    }
}

/// Sequential entity id allocator plus the DATA section body.
struct EntityBuilder {
    next_id: u64,
    body: String,
}

impl EntityBuilder {
    fn new() -> Self {
        Self {
            next_id: 1,
            body: String::new(),
        }
    }

    fn add(&mut self, definition: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.body.push_str(&format!("#{id}={definition};\n"));
        id
    }
}

struct Contexts {
    app: u64,
    geom: u64,
}

fn emit_contexts(b: &mut EntityBuilder, schema: Schema) -> Contexts {
    let app = b.add("APPLICATION_CONTEXT('mechanical design')".to_string());
    let (protocol, year) = schema.protocol_definition();
    b.add(format!(
        "APPLICATION_PROTOCOL_DEFINITION('international standard','{protocol}',{year},#{app})"
    ));

    let length = b.add("(LENGTH_UNIT()NAMED_UNIT(*)SI_UNIT(.MILLI.,.METRE.))".to_string());
    let plane_angle = b.add("(NAMED_UNIT(*)PLANE_ANGLE_UNIT()SI_UNIT($,.RADIAN.))".to_string());
    let solid_angle = b.add("(NAMED_UNIT(*)SI_UNIT($,.STERADIAN.)SOLID_ANGLE_UNIT())".to_string());
    let uncertainty = b.add(format!(
        "UNCERTAINTY_MEASURE_WITH_UNIT(LENGTH_MEASURE(1.E-06),#{length},\
         'distance_accuracy_value','confusion')"
    ));
    let geom = b.add(format!(
        "(GEOMETRIC_REPRESENTATION_CONTEXT(3)\
         GLOBAL_UNCERTAINTY_ASSIGNED_CONTEXT((#{uncertainty}))\
         GLOBAL_UNIT_ASSIGNED_CONTEXT((#{length},#{plane_angle},#{solid_angle}))\
         REPRESENTATION_CONTEXT('',''))"
    ));

    Contexts { app, geom }
}

fn emit_product_structure(b: &mut EntityBuilder, ctx: &Contexts, items: &[u64]) {
    let representation = b.add(format!(
        "SHAPE_REPRESENTATION('',({}),#{})",
        refs(items),
        ctx.geom
    ));
    let product = b.add(format!("PRODUCT('voxstep','voxstep','',(#{}))", ctx.app));
    let formation = b.add(format!("PRODUCT_DEFINITION_FORMATION('','',#{product})"));
    let design = b.add(format!("DESIGN_CONTEXT('design',#{},'design')", ctx.app));
    let definition = b.add(format!("PRODUCT_DEFINITION('','',#{formation},#{design})"));
    let shape = b.add(format!("PRODUCT_DEFINITION_SHAPE('','',#{definition})"));
    b.add(format!(
        "SHAPE_DEFINITION_REPRESENTATION(#{shape},#{representation})"
    ));
}

/// Emit the full B-rep entity graph for one box; returns the
/// MANIFOLD_SOLID_BREP id.
fn emit_solid(b: &mut EntityBuilder, solid: &BoxSolid) -> u64 {
    let points: Vec<u64> = solid
        .vertices()
        .iter()
        .map(|p| emit_point(b, p))
        .collect();
    let vertex_points: Vec<u64> = points
        .iter()
        .map(|&pid| b.add(format!("VERTEX_POINT('',#{pid})")))
        .collect();

    // Each unique edge gets one EDGE_CURVE, oriented from the lower to
    // the higher vertex index; faces reference it via ORIENTED_EDGE.
    let mut edge_curves: HashMap<(usize, usize), u64> = HashMap::new();
    for (low, high) in solid.edges() {
        let span = solid.vertices()[high] - solid.vertices()[low];
        let length = span.norm();
        let dir = emit_direction(b, &(span / length));
        let vector = b.add(format!("VECTOR('',#{dir},{})", real(length)));
        let line = b.add(format!("LINE('',#{},#{vector})", points[low]));
        let edge = b.add(format!(
            "EDGE_CURVE('',#{},#{},#{line},.T.)",
            vertex_points[low], vertex_points[high]
        ));
        edge_curves.insert((low, high), edge);
    }

    let mut faces = Vec::with_capacity(6);
    for face in solid.faces() {
        let origin = emit_point(b, &face.plane_origin);
        let normal = emit_direction(b, &face.normal().normalize());
        let ref_dir = emit_direction(b, &face.x_dir.normalize());
        let placement = b.add(format!("AXIS2_PLACEMENT_3D('',#{origin},#{normal},#{ref_dir})"));
        let plane = b.add(format!("PLANE('',#{placement})"));

        let mut oriented = Vec::with_capacity(4);
        for j in 0..4 {
            let from = face.vertices[j];
            let to = face.vertices[(j + 1) % 4];
            let edge = edge_curves[&(from.min(to), from.max(to))];
            let sense = if from < to { ".T." } else { ".F." };
            oriented.push(b.add(format!("ORIENTED_EDGE('',*,*,#{edge},{sense})")));
        }

        let edge_loop = b.add(format!("EDGE_LOOP('',({}))", refs(&oriented)));
        let bound = b.add(format!("FACE_OUTER_BOUND('',#{edge_loop},.T.)"));
        faces.push(b.add(format!("ADVANCED_FACE('',(#{bound}),#{plane},.T.)")));
    }

    let shell = b.add(format!("CLOSED_SHELL('',({}))", refs(&faces)));
    b.add(format!("MANIFOLD_SOLID_BREP('voxel',#{shell})"))
}

fn emit_point(b: &mut EntityBuilder, p: &Point3) -> u64 {
    b.add(format!(
        "CARTESIAN_POINT('',({},{},{}))",
        real(p.x),
        real(p.y),
        real(p.z)
    ))
}

fn emit_direction(b: &mut EntityBuilder, v: &Vec3) -> u64 {
    b.add(format!(
        "DIRECTION('',({},{},{}))",
        real(v.x),
        real(v.y),
        real(v.z)
    ))
}

fn refs(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a real with the trailing decimal point Part 21 requires.
fn real(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s
    } else {
        format!("{s}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    fn single_box() -> Compound {
        let mut compound = Compound::new();
        compound.push(BoxSolid::new(10.0, 10.0, 10.0));
        compound
    }

    #[test]
    fn test_empty_compound_is_valid_file() {
        let out = StepExporter::new(Schema::Ap203)
            .transfer(&Compound::new())
            .write_to_buffer()
            .unwrap();
        assert!(out.starts_with("ISO-10303-21;"));
        assert!(out.ends_with("END-ISO-10303-21;\n"));
        assert!(out.contains("SHAPE_REPRESENTATION"));
        assert_eq!(count(&out, "MANIFOLD_SOLID_BREP"), 0);
    }

    #[test]
    fn test_box_entity_graph() {
        let out = StepExporter::new(Schema::Ap203)
            .transfer(&single_box())
            .write_to_buffer()
            .unwrap();
        assert_eq!(count(&out, "MANIFOLD_SOLID_BREP"), 1);
        assert_eq!(count(&out, "CLOSED_SHELL"), 1);
        assert_eq!(count(&out, "ADVANCED_FACE"), 6);
        assert_eq!(count(&out, "FACE_OUTER_BOUND"), 6);
        assert_eq!(count(&out, "EDGE_CURVE"), 12);
        assert_eq!(count(&out, "ORIENTED_EDGE"), 24);
        assert_eq!(count(&out, "VERTEX_POINT"), 8);
    }

    #[test]
    fn test_box_corner_coordinates() {
        let out = StepExporter::new(Schema::Ap203)
            .transfer(&single_box())
            .write_to_buffer()
            .unwrap();
        assert!(out.contains("CARTESIAN_POINT('',(10.,0.,0.))"));
        assert!(out.contains("CARTESIAN_POINT('',(10.,10.,10.))"));
    }

    #[test]
    fn test_one_solid_per_compound_member() {
        let mut compound = Compound::new();
        for i in 0..5 {
            compound.push(BoxSolid::new(1.0, 1.0, 1.0).translated(i as f64, 0.0, 0.0));
        }
        let out = StepExporter::new(Schema::Ap203)
            .transfer(&compound)
            .write_to_buffer()
            .unwrap();
        assert_eq!(count(&out, "MANIFOLD_SOLID_BREP"), 5);
    }

    #[test]
    fn test_schema_selects_header_identifier() {
        for (schema, identifier) in [
            (Schema::Ap203, "FILE_SCHEMA(('CONFIG_CONTROL_DESIGN'));"),
            (Schema::Ap214Is, "FILE_SCHEMA(('AUTOMOTIVE_DESIGN'));"),
            (
                Schema::Ap242Dis,
                "FILE_SCHEMA(('AP242_MANAGED_MODEL_BASED_3D_ENGINEERING'));",
            ),
        ] {
            let out = StepExporter::new(schema)
                .transfer(&single_box())
                .write_to_buffer()
                .unwrap();
            assert!(out.contains(identifier), "missing header for {schema}");
        }
    }

    #[test]
    fn test_schema_does_not_change_geometry() {
        let data_of = |schema| {
            let out = StepExporter::new(schema)
                .transfer(&single_box())
                .write_to_buffer()
                .unwrap();
            // Geometry entities are identical; only header/protocol
            // entities differ.
            assert_eq!(count(&out, "MANIFOLD_SOLID_BREP"), 1);
            count(&out, "CARTESIAN_POINT")
        };
        assert_eq!(data_of(Schema::Ap203), data_of(Schema::Ap214Is));
    }

    #[test]
    fn test_output_is_deterministic() {
        let render = || {
            StepExporter::new(Schema::Ap203)
                .transfer(&single_box())
                .write_to_buffer()
                .unwrap()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.stp");
        StepExporter::new(Schema::Ap203)
            .transfer(&single_box())
            .write(&path)
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("FILE_NAME('box.stp'"));
    }

    #[test]
    fn test_write_failure_is_surfaced() {
        let result = StepExporter::new(Schema::Ap203)
            .transfer(&single_box())
            .write("/nonexistent-dir/box.stp");
        assert!(matches!(result, Err(StepError::Io(_))));
    }
}
