//! STEP application protocol selection.

use std::fmt;
use std::str::FromStr;

use crate::error::StepError;

/// The STEP application protocol dialect to write.
///
/// Selects the FILE_SCHEMA identifier and application protocol definition
/// emitted in the output; the geometry entities are identical across
/// dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schema {
    /// AP203: Configuration Controlled 3D Design.
    #[default]
    Ap203,
    /// AP214IS: Automotive Design (International Standard).
    Ap214Is,
    /// AP242DIS: Managed Model Based 3D Engineering (Draft International
    /// Standard).
    Ap242Dis,
}

impl Schema {
    /// The protocol name as callers spell it.
    pub fn protocol(&self) -> &'static str {
        match self {
            Schema::Ap203 => "AP203",
            Schema::Ap214Is => "AP214IS",
            Schema::Ap242Dis => "AP242DIS",
        }
    }

    /// The schema identifier written into the FILE_SCHEMA header field.
    pub fn file_schema(&self) -> &'static str {
        match self {
            Schema::Ap203 => "CONFIG_CONTROL_DESIGN",
            Schema::Ap214Is => "AUTOMOTIVE_DESIGN",
            Schema::Ap242Dis => "AP242_MANAGED_MODEL_BASED_3D_ENGINEERING",
        }
    }

    /// Application protocol name and year for the
    /// APPLICATION_PROTOCOL_DEFINITION entity.
    pub fn protocol_definition(&self) -> (&'static str, u32) {
        match self {
            Schema::Ap203 => ("config_control_design", 1994),
            Schema::Ap214Is => ("automotive_design", 2000),
            Schema::Ap242Dis => ("ap242_managed_model_based_3d_engineering", 2011),
        }
    }
}

impl FromStr for Schema {
    type Err = StepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AP203" => Ok(Schema::Ap203),
            "AP214IS" => Ok(Schema::Ap214Is),
            "AP242DIS" => Ok(Schema::Ap242Dis),
            other => Err(StepError::UnknownProtocol(other.to_string())),
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.protocol())
    }
}
