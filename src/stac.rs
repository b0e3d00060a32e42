//! STAC item assembly
//!
//! Serde models for the subset of the STAC spec this tool emits, plus the
//! builder that maps a [`Dataset`] into a catalog-ready item with the
//! projection extension populated.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::errors::Result;
use crate::geometry::Footprint;

/// STAC specification version written into items.
pub const STAC_VERSION: &str = "1.0.0";

/// Projection extension schema listed in `stac_extensions`.
pub const PROJECTION_EXTENSION: &str =
    "https://stac-extensions.github.io/projection/v1.1.0/schema.json";

/// Media type recorded for netCDF assets.
pub const NETCDF_MEDIA_TYPE: &str = "application/x-netcdf";

/// A STAC item: a GeoJSON feature with catalog metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub stac_version: String,
    pub stac_extensions: Vec<String>,
    pub id: String,
    pub geometry: Footprint,
    pub bbox: [f64; 4],
    pub properties: StacProperties,
    pub assets: BTreeMap<String, StacAsset>,
    pub links: Vec<StacLink>,
}

/// Item properties, including projection-extension and GOES-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacProperties {
    pub datetime: DateTime<Utc>,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub platform: String,
    pub instruments: Vec<String>,
    pub mission: String,
    #[serde(rename = "proj:wkt2")]
    pub proj_wkt2: String,
    #[serde(rename = "proj:shape")]
    pub proj_shape: [usize; 2],
    #[serde(rename = "proj:transform")]
    pub proj_transform: [f64; 9],
    #[serde(rename = "proj:bbox")]
    pub proj_bbox: [f64; 4],
    #[serde(rename = "goes:image-type")]
    pub image_type: String,
    #[serde(rename = "goes:mode")]
    pub mode: u8,
    #[serde(rename = "goes:channel", skip_serializing_if = "Option::is_none")]
    pub channel: Option<u8>,
    #[serde(rename = "goes:scene-id")]
    pub scene_id: String,
}

/// A downloadable asset of an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacAsset {
    pub href: String,
    #[serde(rename = "type")]
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub roles: Vec<String>,
}

/// A link to a related entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StacLink {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

impl StacItem {
    /// Build an item from an extracted dataset.
    ///
    /// `href` is recorded on every asset; items carry one `data` asset for
    /// the netCDF file plus one entry per image variable so multi-variable
    /// products catalog every image.
    pub fn from_dataset(dataset: &Dataset, href: &str) -> StacItem {
        let file_name = &dataset.file_name;
        let attrs = &dataset.global_attributes;
        let geometry = &dataset.geometry;

        let mut assets = BTreeMap::new();
        assets.insert(
            "data".to_string(),
            StacAsset {
                href: href.to_string(),
                media_type: NETCDF_MEDIA_TYPE.to_string(),
                title: Some(attrs.title.clone()),
                roles: vec!["data".to_string()],
            },
        );
        for variable in &dataset.image_variables {
            assets.insert(
                variable.name.clone(),
                StacAsset {
                    href: href.to_string(),
                    media_type: NETCDF_MEDIA_TYPE.to_string(),
                    title: variable.long_name.clone(),
                    roles: vec!["data".to_string()],
                },
            );
        }

        StacItem {
            item_type: "Feature".to_string(),
            stac_version: STAC_VERSION.to_string(),
            stac_extensions: vec![PROJECTION_EXTENSION.to_string()],
            id: file_name.item_id().to_string(),
            geometry: geometry.footprint.clone(),
            bbox: geometry.bbox,
            properties: StacProperties {
                datetime: attrs.coverage_midpoint(),
                start_datetime: attrs.time_coverage_start,
                end_datetime: attrs.time_coverage_end,
                platform: file_name.platform(),
                instruments: vec!["ABI".to_string()],
                mission: "GOES".to_string(),
                proj_wkt2: geometry.projection_wkt2.clone(),
                proj_shape: geometry.projection_shape,
                proj_transform: geometry.projection_transform,
                proj_bbox: geometry.projection_bbox,
                image_type: file_name.image_type.to_string(),
                mode: file_name.mode,
                channel: file_name.channel,
                scene_id: attrs.scene_id.clone(),
            },
            assets,
            links: Vec::new(),
        }
    }

    /// Pretty-printed JSON text of the item.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
