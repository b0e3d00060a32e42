//! GOES ABI geostationary projection
//!
//! ABI L2 files locate pixels by scan angles in radians from the satellite
//! nadir, with the projection parameters stored on the
//! `goes_imager_projection` grid-mapping variable:
//! - x: East-West scan angle (positive = east of nadir)
//! - y: North-South elevation angle (positive = north of the equator)
//!
//! This module reconstructs the projection from those parameters, converts
//! between scan angles and geographic coordinates, and exports the CRS as
//! WKT2 and PROJ-string text for catalog consumers.
//!
//! Reference: GOES-R Product Definition and Users' Guide (PUG) Volume 4,
//! Section 4.2.8.

use netcdf::File;

use crate::attributes::{require_var_f64, require_var_str, var_f64};
use crate::errors::{GoesStacError, Result};

/// GRS80 equatorial radius (meters), the ellipsoid ABI products are defined on.
pub const GRS80_SEMI_MAJOR: f64 = 6378137.0;
/// GRS80 polar radius (meters).
pub const GRS80_SEMI_MINOR: f64 = 6356752.31414;

/// Geostationary projection parameters.
#[derive(Debug, Clone)]
pub struct GoesProjection {
    /// Satellite height above the Earth surface (meters)
    pub perspective_point_height: f64,
    /// Semi-major axis of the Earth ellipsoid (meters)
    pub semi_major_axis: f64,
    /// Semi-minor axis of the Earth ellipsoid (meters)
    pub semi_minor_axis: f64,
    /// Longitude of the satellite nadir point (degrees, negative west)
    pub longitude_origin: f64,
    /// Latitude of the projection origin (0 for geostationary orbits)
    pub latitude_origin: f64,
    /// Sweep angle axis, `x` for GOES-R (`y` for Meteosat/Himawari)
    pub sweep_angle_axis: String,
}

impl GoesProjection {
    /// Read the projection from the `goes_imager_projection` variable.
    ///
    /// Ellipsoid axes default to GRS80 when absent; the height, nadir
    /// longitude, and sweep axis are required.
    pub fn from_file(file: &File) -> Result<GoesProjection> {
        let var = file
            .variable("goes_imager_projection")
            .ok_or_else(|| GoesStacError::MissingVariable("goes_imager_projection".to_string()))?;

        Ok(GoesProjection {
            perspective_point_height: require_var_f64(&var, "perspective_point_height")?,
            semi_major_axis: var_f64(&var, "semi_major_axis").unwrap_or(GRS80_SEMI_MAJOR),
            semi_minor_axis: var_f64(&var, "semi_minor_axis").unwrap_or(GRS80_SEMI_MINOR),
            longitude_origin: require_var_f64(&var, "longitude_of_projection_origin")?,
            latitude_origin: var_f64(&var, "latitude_of_projection_origin").unwrap_or(0.0),
            sweep_angle_axis: require_var_str(&var, "sweep_angle_axis")?,
        })
    }

    /// Satellite height above the Earth center (meters).
    pub fn height_from_center(&self) -> f64 {
        self.perspective_point_height + self.semi_major_axis
    }

    /// Inverse flattening of the ellipsoid, 0 for a perfect sphere.
    pub fn inverse_flattening(&self) -> f64 {
        let flattening = self.semi_major_axis - self.semi_minor_axis;
        if flattening.abs() < f64::EPSILON * self.semi_major_axis {
            0.0
        } else {
            self.semi_major_axis / flattening
        }
    }

    /// Convert scan angles (radians) to geographic coordinates (degrees).
    ///
    /// Solves the PUG quadratic for the distance from the satellite to the
    /// ellipsoid along the view ray. Returns `None` when the scan angle
    /// points past the limb into space.
    pub fn scan_to_geographic(&self, x_rad: f64, y_rad: f64) -> Option<(f64, f64)> {
        let req = self.semi_major_axis;
        let rpol = self.semi_minor_axis;
        let h = self.height_from_center();
        let lambda_0 = self.longitude_origin.to_radians();

        let sin_x = x_rad.sin();
        let cos_x = x_rad.cos();
        let sin_y = y_rad.sin();
        let cos_y = y_rad.cos();

        let a = sin_x.powi(2)
            + cos_x.powi(2) * (cos_y.powi(2) + (req / rpol).powi(2) * sin_y.powi(2));
        let b = -2.0 * h * cos_x * cos_y;
        let c = h.powi(2) - req.powi(2);

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None; // scan angle points to space
        }

        let rs = (-b - discriminant.sqrt()) / (2.0 * a);

        // Satellite-centered, Earth-fixed view ray endpoint
        let sx = rs * cos_x * cos_y;
        let sy = -rs * sin_x;
        let sz = rs * cos_x * sin_y;

        let lat = ((req / rpol).powi(2) * sz / (h - sx).hypot(sy)).atan();
        let lon = lambda_0 - sy.atan2(h - sx);

        Some((lon.to_degrees(), lat.to_degrees()))
    }

    /// Convert geographic coordinates (degrees) to scan angles (radians).
    ///
    /// Exact algebraic inverse of [`scan_to_geographic`] (sweep-x form:
    /// `x = asin(-sy/|s|)`, `y = atan2(sz, sx)`), so round trips hold to
    /// float precision. Returns `None` when the point is behind the Earth
    /// as seen from the satellite.
    ///
    /// [`scan_to_geographic`]: GoesProjection::scan_to_geographic
    pub fn geographic_to_scan(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        let req = self.semi_major_axis;
        let rpol = self.semi_minor_axis;
        let h = self.height_from_center();
        let lambda_0 = self.longitude_origin.to_radians();

        let lat_rad = lat_deg.to_radians();
        let lon_rad = lon_deg.to_radians();

        // Points past the horizon circle are beyond the limb as seen from
        // the satellite. cos_c is the angular distance from the
        // subsatellite point on a spherical Earth.
        let dlon = lon_rad - lambda_0;
        let cos_c = lat_rad.cos() * dlon.cos();
        let horizon_angle = (req / h).acos();
        if cos_c.acos() > horizon_angle {
            return None;
        }

        // Geocentric latitude, accounting for the Earth's oblateness
        let phi_c = ((rpol / req).powi(2) * lat_rad.tan()).atan();

        // Radius from the Earth center to the surface point
        let e2 = 1.0 - (rpol / req).powi(2);
        let rc = rpol / (1.0 - e2 * phi_c.cos().powi(2)).sqrt();

        let sx = h - rc * phi_c.cos() * (lon_rad - lambda_0).cos();
        let sy = -rc * phi_c.cos() * (lon_rad - lambda_0).sin();
        let sz = rc * phi_c.sin();

        if sx <= 0.0 {
            return None; // behind the Earth from the satellite's perspective
        }

        let norm = (sx * sx + sy * sy + sz * sz).sqrt();
        let x_rad = (-sy / norm).asin();
        let y_rad = sz.atan2(sx);

        Some((x_rad, y_rad))
    }

    /// WKT2 text of the projected CRS.
    ///
    /// Matches what the GDAL netCDF driver derives for these files: a
    /// geostationary-satellite conversion over an unnamed datum carrying the
    /// file's ellipsoid axes.
    pub fn to_wkt2(&self) -> String {
        let sweep = if self.sweep_angle_axis.eq_ignore_ascii_case("y") {
            "Y"
        } else {
            "X"
        };
        let method = format!("Geostationary Satellite (Sweep {sweep})");
        let degree_unit = "ANGLEUNIT[\"degree\",0.0174532925199433]";

        let mut wkt = String::with_capacity(1024);
        wkt.push_str("PROJCRS[\"undefined\",BASEGEOGCRS[\"undefined\",DATUM[\"undefined\",");
        wkt.push_str(&format!(
            "ELLIPSOID[\"undefined\",{},{},LENGTHUNIT[\"metre\",1]]],",
            self.semi_major_axis,
            self.inverse_flattening()
        ));
        wkt.push_str(&format!("PRIMEM[\"Greenwich\",0,{degree_unit}]],"));
        wkt.push_str(&format!("CONVERSION[\"{method}\",METHOD[\"{method}\"],"));
        wkt.push_str(&format!(
            "PARAMETER[\"Latitude of natural origin\",{},{degree_unit},ID[\"EPSG\",8801]],",
            self.latitude_origin
        ));
        wkt.push_str(&format!(
            "PARAMETER[\"Longitude of natural origin\",{},{degree_unit},ID[\"EPSG\",8802]],",
            self.longitude_origin
        ));
        wkt.push_str(&format!(
            "PARAMETER[\"Satellite Height\",{},LENGTHUNIT[\"metre\",1,ID[\"EPSG\",9001]]],",
            self.perspective_point_height
        ));
        wkt.push_str("PARAMETER[\"False easting\",0,LENGTHUNIT[\"metre\",1],ID[\"EPSG\",8806]],");
        wkt.push_str("PARAMETER[\"False northing\",0,LENGTHUNIT[\"metre\",1],ID[\"EPSG\",8807]]],");
        wkt.push_str("CS[Cartesian,2],");
        wkt.push_str("AXIS[\"(E)\",east,ORDER[1],LENGTHUNIT[\"metre\",1,ID[\"EPSG\",9001]]],");
        wkt.push_str("AXIS[\"(N)\",north,ORDER[2],LENGTHUNIT[\"metre\",1,ID[\"EPSG\",9001]]]]");
        wkt
    }

    /// PROJ pipeline string for the projection.
    pub fn to_proj_string(&self) -> String {
        format!(
            "+proj=geos +sweep={} +lon_0={} +h={} +x_0=0 +y_0=0 +a={} +b={} +units=m +no_defs",
            self.sweep_angle_axis.to_ascii_lowercase(),
            self.longitude_origin,
            self.perspective_point_height,
            self.semi_major_axis,
            self.semi_minor_axis,
        )
    }
}
