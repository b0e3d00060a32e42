//! goes-stac: STAC metadata extraction for GOES-R ABI L2 imagery
//!
//! A Rust library for reading GOES-R series ABI Level 2 netCDF files and
//! packaging their spatial and temporal metadata as catalog-ready STAC
//! items. The heart of the crate is the geostationary-projection
//! reconstruction: from the raw parameters embedded in a file it derives the
//! coordinate reference system (WKT2 and PROJ text), the affine transform,
//! the bounding boxes, and a ground footprint polygon, with full-disk
//! imagery special-cased because its rim does not reproject usefully.
//!
//! ## Key Features
//!
//! - **File-name parsing**: product, sector, scan mode, band, satellite, and
//!   timestamps from ABI L2 object names
//! - **Projection reconstruction**: geostationary CRS from the
//!   `goes_imager_projection` grid mapping, with scan-angle/geographic
//!   conversions per the GOES-R PUG
//! - **Catalog geometry**: raster shape, affine transform, projection and
//!   geographic bounding boxes, ground footprint
//! - **STAC output**: items with the projection extension and per-variable
//!   assets
//!
//! ## Module Organization
//!
//! - [`file_name`]: ABI L2 file-name parsing and scene sectors
//! - [`attributes`]: global attribute extraction
//! - [`projection`]: the geostationary projection and CRS text emission
//! - [`geometry`]: transform, bounding boxes, and footprint derivation
//! - [`dataset`]: dataset assembly and reporting
//! - [`stac`]: STAC item models and the item builder
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use goes_stac::dataset::Dataset;
//! use goes_stac::stac::StacItem;
//!
//! let path = "OR_ABI-L2-CMIPC-M6C01_G16_s20211931801172_e20211931803545_c20211931804067.nc";
//! let dataset = Dataset::open(Path::new(path)).unwrap();
//! let item = StacItem::from_dataset(&dataset, path);
//! println!("{}", item.to_json_pretty().unwrap());
//! ```

// Core modules
pub mod attributes;
pub mod dataset;
pub mod errors;
pub mod file_name;
pub mod geometry;
pub mod projection;
pub mod stac;

// Direct re-exports for the public API
pub use dataset::{Dataset, ImageVariable};
pub use errors::{GoesStacError, Result};
pub use file_name::{AbiL2FileName, ImageType};
pub use geometry::{DatasetGeometry, Footprint};
pub use projection::GoesProjection;
pub use stac::StacItem;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::attributes::GlobalAttributes;
    pub use crate::dataset::{Dataset, ImageVariable};
    pub use crate::errors::{GoesStacError, Result};
    pub use crate::file_name::{AbiL2FileName, ImageType};
    pub use crate::geometry::{DatasetGeometry, Footprint};
    pub use crate::projection::GoesProjection;
    pub use crate::stac::{StacAsset, StacItem, StacLink, StacProperties};
}
