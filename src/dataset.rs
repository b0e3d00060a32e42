//! ABI L2 dataset assembly
//!
//! Ties the parsed file name, the global attributes, the derived geometry,
//! and the image-variable inventory together into one value that the STAC
//! builder and the CLI report feed from.

use std::path::Path;

use log::debug;
use netcdf::File;

use crate::attributes::{var_str, GlobalAttributes};
use crate::errors::{GoesStacError, Result};
use crate::file_name::AbiL2FileName;
use crate::geometry::DatasetGeometry;

/// A two-dimensional variable catalogued as an image asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageVariable {
    pub name: String,
    pub long_name: Option<String>,
}

/// An ABI L2 netCDF dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub file_name: AbiL2FileName,
    pub global_attributes: GlobalAttributes,
    pub geometry: DatasetGeometry,
    /// Image variables, sorted by name. Only variables with exactly two
    /// dimensions qualify; coordinate vectors and bounds tables do not.
    pub image_variables: Vec<ImageVariable>,
}

impl Dataset {
    /// Open a file on disk, parsing its name and reading its metadata.
    pub fn open(path: &Path) -> Result<Dataset> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| GoesStacError::FileName {
                name: path.display().to_string(),
                reason: "path has no file name".to_string(),
            })?;
        let file_name = AbiL2FileName::parse(name)?;
        let file = netcdf::open(path)?;
        Dataset::from_file(file_name, &file)
    }

    /// Assemble a dataset from an already-open netCDF file.
    pub fn from_file(file_name: AbiL2FileName, file: &File) -> Result<Dataset> {
        let global_attributes = GlobalAttributes::from_file(file)?;
        let geometry = DatasetGeometry::from_file(file, file_name.image_type)?;

        let mut image_variables: Vec<ImageVariable> = file
            .variables()
            .filter(|var| var.dimensions().len() == 2)
            .map(|var| ImageVariable {
                long_name: var_str(&var, "long_name"),
                name: var.name(),
            })
            .collect();
        image_variables.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("{} image variables found", image_variables.len());

        Ok(Dataset {
            file_name,
            global_attributes,
            geometry,
            image_variables,
        })
    }

    /// Print a human-readable report of the parsed metadata.
    pub fn print_report(&self) {
        println!("\n===== File =====");
        println!("- id: {}", self.file_name.item_id());
        println!("- product: {}", self.file_name.product);
        println!("- sector: {}", self.file_name.image_type);
        println!("- scan mode: {}", self.file_name.mode);
        if let Some(channel) = self.file_name.channel {
            println!("- channel: C{:02}", channel);
        }
        println!("- satellite: {}", self.file_name.platform());
        println!("- start: {}", self.file_name.start);
        println!("- end: {}", self.file_name.end);

        println!("\n===== Global Attributes =====");
        println!("- title: {}", self.global_attributes.title);
        println!("- dataset_name: {}", self.global_attributes.dataset_name);
        println!("- platform: {}", self.global_attributes.platform_id);
        println!("- instrument: {}", self.global_attributes.instrument_type);
        if let Some(slot) = &self.global_attributes.orbital_slot {
            println!("- orbital slot: {}", slot);
        }
        println!("- scene: {}", self.global_attributes.scene_id);
        println!(
            "- coverage: {} to {}",
            self.global_attributes.time_coverage_start, self.global_attributes.time_coverage_end
        );

        println!("\n===== Projection =====");
        println!("- shape: {:?}", self.geometry.projection_shape);
        println!("- transform: {:?}", self.geometry.projection_transform);
        println!("- bbox (projection meters): {:?}", self.geometry.projection_bbox);
        println!("- bbox (lon/lat degrees): {:?}", self.geometry.bbox);
        println!("- proj string: {}", self.geometry.projection_proj_string);

        println!("\n===== Image Variables =====");
        if self.image_variables.is_empty() {
            println!("   (No image variables found)");
        } else {
            for variable in &self.image_variables {
                match &variable.long_name {
                    Some(long_name) => println!("- {} ({})", variable.name, long_name),
                    None => println!("- {}", variable.name),
                }
            }
        }
    }
}
