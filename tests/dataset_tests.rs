//! Integration tests for dataset extraction
//!
//! These tests synthesize small ABI-shaped netCDF files in a temporary
//! directory and check the geometry, attributes, and STAC items derived
//! from them.

use chrono::{Duration, TimeZone, Utc};
use ndarray::{arr1, Array2};
use netcdf::create;
use std::path::Path;
use tempfile::tempdir;

use goes_stac::dataset::Dataset;
use goes_stac::file_name::ImageType;
use goes_stac::stac::StacItem;

const PERSPECTIVE_HEIGHT: f64 = 35786023.0;

const CONUS_NAME: &str =
    "OR_ABI-L2-CMIPC-M6C01_G16_s20211931801172_e20211931803545_c20211931804067.nc";
const FULL_DISK_NAME: &str =
    "OR_ABI-L2-CMIPF-M6C01_G16_s20211931800208_e20211931809516_c20211931809583.nc";

/// Write a small ABI-shaped netCDF file.
///
/// The 3x3 grid spans scan angles -0.01..0.01 rad on both axes with the
/// satellite at 75 W, so the expected projection numbers are simple
/// multiples of the perspective height.
fn write_abi_file(path: &Path, scene_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = create(path)?;

    file.add_attribute("title", "ABI L2 Cloud and Moisture Imagery")?;
    file.add_attribute("dataset_name", CONUS_NAME)?;
    file.add_attribute("platform_ID", "G16")?;
    file.add_attribute("instrument_type", "GOES R Series Advanced Baseline Imager")?;
    file.add_attribute("orbital_slot", "GOES-East")?;
    file.add_attribute("scene_id", scene_id)?;
    file.add_attribute("timeline_id", "ABI Mode 6")?;
    file.add_attribute("time_coverage_start", "2021-07-12T18:01:17.2Z")?;
    file.add_attribute("time_coverage_end", "2021-07-12T18:03:54.5Z")?;

    file.add_dimension("x", 3)?;
    file.add_dimension("y", 3)?;

    let mut x = file.add_variable::<f64>("x", &["x"])?;
    x.put_attribute("scale_factor", 1.0f64)?;
    x.put_attribute("add_offset", 0.0f64)?;
    x.put(arr1(&[-0.01f64, 0.0, 0.01]).view(), ..)?;

    let mut y = file.add_variable::<f64>("y", &["y"])?;
    y.put_attribute("scale_factor", 1.0f64)?;
    y.put_attribute("add_offset", 0.0f64)?;
    y.put(arr1(&[0.01f64, 0.0, -0.01]).view(), ..)?;

    let mut projection = file.add_variable::<i32>("goes_imager_projection", &[])?;
    projection.put_attribute("perspective_point_height", PERSPECTIVE_HEIGHT)?;
    projection.put_attribute("semi_major_axis", 6378137.0f64)?;
    projection.put_attribute("semi_minor_axis", 6356752.31414f64)?;
    projection.put_attribute("latitude_of_projection_origin", 0.0f64)?;
    projection.put_attribute("longitude_of_projection_origin", -75.0f64)?;
    projection.put_attribute("sweep_angle_axis", "x")?;

    let mut extent = file.add_variable::<i32>("geospatial_lat_lon_extent", &[])?;
    extent.put_attribute("geospatial_westbound_longitude", -78.3f64)?;
    extent.put_attribute("geospatial_southbound_latitude", -3.3f64)?;
    extent.put_attribute("geospatial_eastbound_longitude", -71.7f64)?;
    extent.put_attribute("geospatial_northbound_latitude", 3.3f64)?;

    let mut cmi = file.add_variable::<f32>("CMI", &["y", "x"])?;
    cmi.put_attribute("long_name", "ABI L2+ Cloud and Moisture Imagery reflectance factor")?;
    let data = Array2::from_shape_vec((3, 3), (0..9).map(|i| i as f32).collect())?;
    cmi.put(data.view(), ..)?;

    let mut dqf = file.add_variable::<f32>("DQF", &["y", "x"])?;
    dqf.put_attribute("long_name", "ABI L2+ Cloud and Moisture Imagery data quality flags")?;
    dqf.put(Array2::<f32>::zeros((3, 3)).view(), ..)?;

    Ok(())
}

#[test]
fn conus_dataset_geometry() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join(CONUS_NAME);
    write_abi_file(&path, "CONUS").expect("failed to build fixture");

    let dataset = Dataset::open(&path).expect("failed to open dataset");

    assert_eq!(dataset.file_name.image_type, ImageType::Conus);
    assert_eq!(dataset.file_name.channel, Some(1));
    assert_eq!(dataset.file_name.satellite, "G16");

    let geometry = &dataset.geometry;
    assert_eq!(geometry.projection_shape, [3, 3]);
    assert_eq!(geometry.bbox, [-78.3, -3.3, -71.7, 3.3]);

    // 0.01 rad of scan angle is 0.01 * height meters on the grid
    let resolution = 0.01 * PERSPECTIVE_HEIGHT;
    let transform = &geometry.projection_transform;
    assert!((transform[0] - resolution).abs() < 1e-6, "x res: {}", transform[0]);
    assert!((transform[4] + resolution).abs() < 1e-6, "y res: {}", transform[4]);
    // origin is the first cell center backed off by half a cell
    assert!((transform[2] + 0.015 * PERSPECTIVE_HEIGHT).abs() < 1e-6);
    assert!((transform[5] - 0.015 * PERSPECTIVE_HEIGHT).abs() < 1e-6);
    assert_eq!(&transform[6..], &[0.0, 0.0, 1.0]);

    let projection_bbox = &geometry.projection_bbox;
    assert!((projection_bbox[0] + resolution).abs() < 1e-6);
    assert!((projection_bbox[1] - resolution).abs() < 1e-6);
    assert!((projection_bbox[2] - resolution).abs() < 1e-6);
    assert!((projection_bbox[3] + resolution).abs() < 1e-6);

    // the footprint is the reprojected corner ring, closed
    let ring = geometry.footprint.exterior();
    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], ring[4]);
    // north-west corner: west of the satellite longitude, north of the equator
    assert!(ring[0][0] > -80.0 && ring[0][0] < -75.0, "nw lon: {}", ring[0][0]);
    assert!(ring[0][1] > 0.0 && ring[0][1] < 5.0, "nw lat: {}", ring[0][1]);
    // south-east corner mirrors it
    assert!(ring[2][0] > -75.0 && ring[2][0] < -70.0, "se lon: {}", ring[2][0]);
    assert!(ring[2][1] < 0.0 && ring[2][1] > -5.0, "se lat: {}", ring[2][1]);

    assert!(geometry.projection_wkt2.contains("Geostationary Satellite (Sweep X)"));
    assert!(geometry.projection_proj_string.contains("+proj=geos"));

    let names: Vec<&str> = dataset
        .image_variables
        .iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(names, ["CMI", "DQF"]);
}

#[test]
fn full_disk_footprint_falls_back_to_bbox() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join(FULL_DISK_NAME);
    write_abi_file(&path, "Full Disk").expect("failed to build fixture");

    let dataset = Dataset::open(&path).expect("failed to open dataset");

    assert_eq!(dataset.file_name.image_type, ImageType::FullDisk);

    let ring = dataset.geometry.footprint.exterior();
    assert_eq!(
        ring,
        [
            [-78.3, -3.3],
            [-71.7, -3.3],
            [-71.7, 3.3],
            [-78.3, 3.3],
            [-78.3, -3.3],
        ]
    );
}

#[test]
fn global_attributes_and_coverage() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join(CONUS_NAME);
    write_abi_file(&path, "CONUS").expect("failed to build fixture");

    let dataset = Dataset::open(&path).expect("failed to open dataset");
    let attrs = &dataset.global_attributes;

    assert_eq!(attrs.platform_id, "G16");
    assert_eq!(attrs.scene_id, "CONUS");
    assert_eq!(attrs.orbital_slot.as_deref(), Some("GOES-East"));

    let start = Utc.with_ymd_and_hms(2021, 7, 12, 18, 1, 17).unwrap() + Duration::milliseconds(200);
    let end = Utc.with_ymd_and_hms(2021, 7, 12, 18, 3, 54).unwrap() + Duration::milliseconds(500);
    assert_eq!(attrs.time_coverage_start, start);
    assert_eq!(attrs.time_coverage_end, end);

    // the file-name scan start matches the coverage start
    assert_eq!(dataset.file_name.start, start);
}

#[test]
fn stac_item_from_dataset() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join(CONUS_NAME);
    write_abi_file(&path, "CONUS").expect("failed to build fixture");

    let dataset = Dataset::open(&path).expect("failed to open dataset");
    let item = StacItem::from_dataset(&dataset, "s3://noaa-goes16/fixture.nc");

    assert_eq!(item.item_type, "Feature");
    assert_eq!(item.stac_version, "1.0.0");
    assert_eq!(item.id, CONUS_NAME.trim_end_matches(".nc"));
    assert_eq!(item.bbox, [-78.3, -3.3, -71.7, 3.3]);
    assert_eq!(item.properties.platform, "GOES-16");
    assert_eq!(item.properties.instruments, vec!["ABI".to_string()]);
    assert_eq!(item.properties.image_type, "CONUS");
    assert_eq!(item.properties.proj_shape, [3, 3]);

    // midpoint of 18:01:17.2 .. 18:03:54.5
    let expected = Utc.with_ymd_and_hms(2021, 7, 12, 18, 2, 35).unwrap()
        + Duration::milliseconds(850);
    assert_eq!(item.properties.datetime, expected);

    assert!(item.assets.contains_key("data"));
    assert!(item.assets.contains_key("CMI"));
    assert!(item.assets.contains_key("DQF"));
    let data_asset = item.assets.get("data").expect("data asset present");
    assert_eq!(data_asset.href, "s3://noaa-goes16/fixture.nc");

    let json: serde_json::Value =
        serde_json::from_str(&item.to_json_pretty().expect("serializes")).expect("parses back");
    assert_eq!(json["properties"]["goes:image-type"], "CONUS");
    assert_eq!(json["properties"]["proj:transform"].as_array().map(|a| a.len()), Some(9));
}

#[test]
fn missing_projection_variable_is_an_error() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join(CONUS_NAME);

    {
        let mut file = create(&path).expect("failed to create file");
        file.add_attribute("title", "broken").expect("attribute");
    }

    let result = Dataset::open(&path);
    assert!(result.is_err(), "a file without projection metadata must not parse");
}
