//! Global attribute extraction from ABI L2 netCDF files
//!
//! ABI files carry their identity (dataset name, platform, scene) and their
//! temporal coverage as global attributes. This module reads them into a
//! typed struct and provides the attribute-access helpers shared by the
//! projection and geometry readers.

use chrono::{DateTime, Utc};
use netcdf::{AttributeValue, File, Variable};

use crate::errors::{GoesStacError, Result};

/// Identity and coverage attributes of an ABI L2 dataset.
#[derive(Debug, Clone)]
pub struct GlobalAttributes {
    pub title: String,
    pub dataset_name: String,
    pub platform_id: String,
    pub instrument_type: String,
    pub orbital_slot: Option<String>,
    pub scene_id: String,
    pub timeline_id: Option<String>,
    pub time_coverage_start: DateTime<Utc>,
    pub time_coverage_end: DateTime<Utc>,
}

impl GlobalAttributes {
    /// Read the global attributes of an open ABI L2 file.
    pub fn from_file(file: &File) -> Result<GlobalAttributes> {
        let start = require_global_str(file, "time_coverage_start")?;
        let end = require_global_str(file, "time_coverage_end")?;

        Ok(GlobalAttributes {
            title: require_global_str(file, "title")?,
            dataset_name: require_global_str(file, "dataset_name")?,
            platform_id: require_global_str(file, "platform_ID")?,
            instrument_type: require_global_str(file, "instrument_type")?,
            orbital_slot: global_str(file, "orbital_slot"),
            scene_id: require_global_str(file, "scene_id")?,
            timeline_id: global_str(file, "timeline_id"),
            time_coverage_start: DateTime::parse_from_rfc3339(&start)?.with_timezone(&Utc),
            time_coverage_end: DateTime::parse_from_rfc3339(&end)?.with_timezone(&Utc),
        })
    }

    /// Midpoint of the coverage window, used as the catalog item datetime.
    pub fn coverage_midpoint(&self) -> DateTime<Utc> {
        self.time_coverage_start + (self.time_coverage_end - self.time_coverage_start) / 2
    }
}

/// Convert a numeric attribute value to `f64`.
///
/// ABI files store several numeric attributes as single-element arrays, so
/// both the scalar and the one-element forms are accepted.
fn numeric(value: AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(v),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Float(v) => Some(v as f64),
        AttributeValue::Floats(v) => v.first().map(|&x| x as f64),
        AttributeValue::Int(v) => Some(v as f64),
        AttributeValue::Ints(v) => v.first().map(|&x| x as f64),
        AttributeValue::Short(v) => Some(v as f64),
        AttributeValue::Shorts(v) => v.first().map(|&x| x as f64),
        _ => None,
    }
}

fn text(value: AttributeValue) -> Option<String> {
    match value {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(v) => v.into_iter().next(),
        _ => None,
    }
}

/// Optional numeric attribute of a variable.
pub(crate) fn var_f64(var: &Variable, name: &str) -> Option<f64> {
    numeric(var.attribute_value(name)?.ok()?)
}

/// Optional string attribute of a variable.
pub(crate) fn var_str(var: &Variable, name: &str) -> Option<String> {
    text(var.attribute_value(name)?.ok()?)
}

/// Required numeric attribute of a variable.
pub(crate) fn require_var_f64(var: &Variable, name: &str) -> Result<f64> {
    let value = var
        .attribute_value(name)
        .ok_or_else(|| GoesStacError::MissingAttribute {
            owner: var.name(),
            attribute: name.to_string(),
        })??;
    numeric(value).ok_or_else(|| GoesStacError::AttributeType {
        owner: var.name(),
        attribute: name.to_string(),
    })
}

/// Required string attribute of a variable.
pub(crate) fn require_var_str(var: &Variable, name: &str) -> Result<String> {
    let value = var
        .attribute_value(name)
        .ok_or_else(|| GoesStacError::MissingAttribute {
            owner: var.name(),
            attribute: name.to_string(),
        })??;
    text(value).ok_or_else(|| GoesStacError::AttributeType {
        owner: var.name(),
        attribute: name.to_string(),
    })
}

fn global_str(file: &File, name: &str) -> Option<String> {
    let attr = file.attributes().find(|a| a.name() == name)?;
    text(attr.value().ok()?)
}

fn require_global_str(file: &File, name: &str) -> Result<String> {
    global_str(file, name).ok_or_else(|| GoesStacError::MissingAttribute {
        owner: "global".to_string(),
        attribute: name.to_string(),
    })
}
