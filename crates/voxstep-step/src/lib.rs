#![warn(missing_docs)]

//! STEP file export for voxstep.
//!
//! Writes compounds of B-rep box solids as STEP files (ISO 10303-21)
//! under a selectable application protocol: AP203 (Configuration
//! Controlled Design), AP214IS (Automotive Design), or AP242DIS
//! (Managed Model Based 3D Engineering).
//!
//! # Example
//!
//! ```no_run
//! use voxstep_brep::{BoxSolid, Compound};
//! use voxstep_step::{Schema, StepExporter};
//!
//! let mut compound = Compound::new();
//! compound.push(BoxSolid::new(10.0, 10.0, 10.0));
//!
//! StepExporter::new(Schema::Ap203)
//!     .transfer(&compound)
//!     .write("box.stp")
//!     .unwrap();
//! ```

mod error;
mod schema;
mod writer;

pub use error::StepError;
pub use schema::Schema;
pub use writer::{StepExporter, TransferredExporter};
