//! Projection and footprint geometry for an ABI L2 dataset
//!
//! Reconstructs the catalog geometry of a file: the raster shape, the affine
//! transform and bounding box in projection coordinates (meters), the
//! geographic bounding box, and a ground footprint polygon. Full-disk imagery
//! keeps the geographic bounding box as its footprint because the disk rim
//! does not reproject to lat/lon usefully.

use log::debug;
use netcdf::File;
use serde::{Deserialize, Serialize};

use crate::attributes::{require_var_f64, var_f64};
use crate::errors::{GoesStacError, Result};
use crate::file_name::ImageType;
use crate::projection::GoesProjection;

/// GeoJSON polygon footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

impl Footprint {
    /// Polygon from a single closed exterior ring.
    pub fn polygon(ring: Vec<[f64; 2]>) -> Footprint {
        Footprint {
            geometry_type: "Polygon".to_string(),
            coordinates: vec![ring],
        }
    }

    /// Rectangle polygon covering a `[xmin, ymin, xmax, ymax]` bounding box.
    pub fn from_bbox(bbox: &[f64; 4]) -> Footprint {
        let [xmin, ymin, xmax, ymax] = *bbox;
        Footprint::polygon(vec![
            [xmin, ymin],
            [xmax, ymin],
            [xmax, ymax],
            [xmin, ymax],
            [xmin, ymin],
        ])
    }

    /// The exterior ring.
    pub fn exterior(&self) -> &[[f64; 2]] {
        &self.coordinates[0]
    }
}

/// The projection and geometry information for an ABI L2 dataset.
#[derive(Debug, Clone)]
pub struct DatasetGeometry {
    /// WKT2 text of the geostationary CRS
    pub projection_wkt2: String,
    /// PROJ string of the geostationary CRS
    pub projection_proj_string: String,
    /// Grid point counts along the x and y axes
    pub projection_shape: [usize; 2],
    /// Row-major 3x3 affine transform from pixel to projection coordinates
    pub projection_transform: [f64; 9],
    /// `[x_first, y_first, x_last, y_last]` in projection meters
    pub projection_bbox: [f64; 4],
    /// Geographic `[xmin, ymin, xmax, ymax]` bounding box in degrees
    pub bbox: [f64; 4],
    /// Ground footprint polygon in lon/lat degrees
    pub footprint: Footprint,
}

impl DatasetGeometry {
    /// Derive the geometry of an open ABI L2 file.
    pub fn from_file(file: &File, image_type: ImageType) -> Result<DatasetGeometry> {
        let projection = GoesProjection::from_file(file)?;
        let height = projection.perspective_point_height;

        let extent = file
            .variable("geospatial_lat_lon_extent")
            .ok_or_else(|| GoesStacError::MissingVariable("geospatial_lat_lon_extent".to_string()))?;
        let bbox = [
            require_var_f64(&extent, "geospatial_westbound_longitude")?,
            require_var_f64(&extent, "geospatial_southbound_latitude")?,
            require_var_f64(&extent, "geospatial_eastbound_longitude")?,
            require_var_f64(&extent, "geospatial_northbound_latitude")?,
        ];

        let (x_first, x_last, x_count) = scaled_coordinate_bounds(file, "x", height)?;
        let (y_first, y_last, y_count) = scaled_coordinate_bounds(file, "y", height)?;
        debug!(
            "projection extent: x {:.1}..{:.1} m ({} cells), y {:.1}..{:.1} m ({} cells)",
            x_first, x_last, x_count, y_first, y_last, y_count
        );

        // Coordinate values are cell centers, so resolution comes from the
        // center-to-center span and the transform origin backs off half a
        // cell to the grid edge.
        let x_res = (x_last - x_first) / (x_count as f64 - 1.0);
        let y_res = (y_last - y_first) / (y_count as f64 - 1.0);

        let projection_transform = [
            x_res,
            0.0,
            x_first - x_res / 2.0,
            0.0,
            y_res,
            y_first - y_res / 2.0,
            0.0,
            0.0,
            1.0,
        ];
        let projection_bbox = [x_first, y_first, x_last, y_last];

        let footprint = if image_type.is_full_disk() {
            // Full-disk rims degrade under reprojection, so the geographic
            // bounding box stands in for the footprint.
            Footprint::from_bbox(&bbox)
        } else {
            let corners = [
                [x_first, y_first],
                [x_first, y_last],
                [x_last, y_last],
                [x_last, y_first],
                [x_first, y_first],
            ];
            let mut ring = Vec::with_capacity(corners.len());
            for [x_m, y_m] in corners {
                // Projection meters over the perspective height gives the
                // scan angle back.
                let (lon, lat) = projection
                    .scan_to_geographic(x_m / height, y_m / height)
                    .ok_or_else(|| {
                        GoesStacError::InvalidProjection(format!(
                            "grid corner ({:.1} m, {:.1} m) does not intersect the ellipsoid",
                            x_m, y_m
                        ))
                    })?;
                ring.push([lon, lat]);
            }
            Footprint::polygon(ring)
        };

        Ok(DatasetGeometry {
            projection_wkt2: projection.to_wkt2(),
            projection_proj_string: projection.to_proj_string(),
            projection_shape: [x_count, y_count],
            projection_transform,
            projection_bbox,
            bbox,
            footprint,
        })
    }
}

/// First and last coordinate of a scan-angle axis in projection meters,
/// plus the cell count.
///
/// Coordinate variables store packed values; `scale_factor`/`add_offset`
/// are applied manually (defaulting to 1/0) and the result is multiplied
/// by the perspective height to get meters.
fn scaled_coordinate_bounds(file: &File, name: &str, height: f64) -> Result<(f64, f64, usize)> {
    let var = file
        .variable(name)
        .ok_or_else(|| GoesStacError::MissingVariable(name.to_string()))?;

    let values: Vec<f64> = var.get_values::<f64, _>(..)?;
    let (first, last) = match (values.first(), values.last()) {
        (Some(&first), Some(&last)) if values.len() >= 2 => (first, last),
        _ => {
            return Err(GoesStacError::InvalidProjection(format!(
                "coordinate axis '{}' needs at least 2 points, found {}",
                name,
                values.len()
            )))
        }
    };

    let scale = var_f64(&var, "scale_factor").unwrap_or(1.0);
    let offset = var_f64(&var, "add_offset").unwrap_or(0.0);

    Ok((
        (scale * first + offset) * height,
        (scale * last + offset) * height,
        values.len(),
    ))
}
