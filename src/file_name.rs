//! ABI L2 file name parsing
//!
//! GOES-R ABI Level 2 products are distributed with names of the form
//!
//! ```text
//! OR_ABI-L2-CMIPC-M6C01_G16_s20211931801172_e20211931803545_c20211931804067.nc
//! ```
//!
//! encoding the product, scene sector, scan mode, optional band, satellite,
//! and the scan start/end and file creation timestamps. Timestamps are
//! `YYYYJJJHHMMSSt` (year, day-of-year, hour, minute, second, tenths of a
//! second).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::errors::{GoesStacError, Result};

/// Scene sector of an ABI image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageType {
    FullDisk,
    Conus,
    Mesoscale1,
    Mesoscale2,
}

impl ImageType {
    /// Map a file-name sector code (`F`, `C`, `M1`, `M2`) to its sector.
    pub fn from_sector(code: &str) -> Option<ImageType> {
        match code {
            "F" => Some(ImageType::FullDisk),
            "C" => Some(ImageType::Conus),
            "M1" => Some(ImageType::Mesoscale1),
            "M2" => Some(ImageType::Mesoscale2),
            _ => None,
        }
    }

    /// Whether this is the full-disk sector.
    ///
    /// Full-disk imagery gets special-case footprint handling because the
    /// disk rim does not reproject to lat/lon usefully.
    pub fn is_full_disk(&self) -> bool {
        matches!(self, ImageType::FullDisk)
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageType::FullDisk => "Full Disk",
            ImageType::Conus => "CONUS",
            ImageType::Mesoscale1 => "Mesoscale 1",
            ImageType::Mesoscale2 => "Mesoscale 2",
        })
    }
}

/// Parsed fields of an ABI L2 file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiL2FileName {
    /// File name without the `.nc` extension, used as the catalog item id
    stem: String,
    /// System environment code, `OR` for operational real-time data
    pub system_environment: String,
    /// Product acronym, e.g. `CMIP`, `FDC`, `LST`
    pub product: String,
    /// Scene sector
    pub image_type: ImageType,
    /// ABI scan mode number
    pub mode: u8,
    /// Band number for single-band products (`C01`..`C16`)
    pub channel: Option<u8>,
    /// Satellite code, e.g. `G16`
    pub satellite: String,
    /// Scan start time
    pub start: DateTime<Utc>,
    /// Scan end time
    pub end: DateTime<Utc>,
    /// File creation time
    pub created: DateTime<Utc>,
}

impl AbiL2FileName {
    /// Parse an ABI L2 file name, with or without the `.nc` extension.
    pub fn parse(name: &str) -> Result<AbiL2FileName> {
        let fail = |reason: &str| GoesStacError::FileName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let stem = name.strip_suffix(".nc").unwrap_or(name);

        let segments: Vec<&str> = stem.split('_').collect();
        if segments.len() != 6 {
            return Err(fail("expected 6 underscore-separated segments"));
        }

        let descriptor: Vec<&str> = segments[1].split('-').collect();
        if descriptor.len() != 4 || descriptor[0] != "ABI" || descriptor[1] != "L2" {
            return Err(fail(
                "expected an ABI-L2-<product><sector>-M<mode>[C<channel>] descriptor",
            ));
        }

        let (product, image_type) =
            split_sector(descriptor[2]).ok_or_else(|| fail("unknown scene sector"))?;
        let (mode, channel) =
            parse_mode_channel(descriptor[3]).ok_or_else(|| fail("invalid scan mode segment"))?;

        let satellite = segments[2];
        if satellite.len() < 2 || !satellite.starts_with('G') {
            return Err(fail("expected a G<nn> satellite segment"));
        }

        let start = parse_timestamp(segments[3], 's').ok_or_else(|| fail("invalid start timestamp"))?;
        let end = parse_timestamp(segments[4], 'e').ok_or_else(|| fail("invalid end timestamp"))?;
        let created =
            parse_timestamp(segments[5], 'c').ok_or_else(|| fail("invalid creation timestamp"))?;

        Ok(AbiL2FileName {
            stem: stem.to_string(),
            system_environment: segments[0].to_string(),
            product: product.to_string(),
            image_type,
            mode,
            channel,
            satellite: satellite.to_string(),
            start,
            end,
            created,
        })
    }

    /// Catalog item id derived from the file name (the stem).
    pub fn item_id(&self) -> &str {
        &self.stem
    }

    /// Human-readable title, e.g. `CMIP CONUS`.
    pub fn title(&self) -> String {
        format!("{} {}", self.product, self.image_type)
    }

    /// Platform name for catalog metadata, e.g. `GOES-16`.
    pub fn platform(&self) -> String {
        format!("GOES-{}", &self.satellite[1..])
    }
}

/// Split a `<product><sector>` token such as `CMIPC` or `FDCF`.
///
/// Mesoscale sectors occupy two trailing characters and must be checked
/// before the single-character full-disk and CONUS codes.
fn split_sector(token: &str) -> Option<(&str, ImageType)> {
    for suffix in ["M1", "M2", "F", "C"] {
        if let Some(product) = token.strip_suffix(suffix) {
            if !product.is_empty() {
                return ImageType::from_sector(suffix).map(|image_type| (product, image_type));
            }
        }
    }
    None
}

/// Parse a `M<mode>[C<channel>]` token such as `M6C01` or `M6`.
fn parse_mode_channel(token: &str) -> Option<(u8, Option<u8>)> {
    let rest = token.strip_prefix('M')?;
    match rest.split_once('C') {
        Some((mode, channel)) => Some((mode.parse().ok()?, Some(channel.parse().ok()?))),
        None => Some((rest.parse().ok()?, None)),
    }
}

/// Parse a `<prefix>YYYYJJJHHMMSSt` timestamp segment.
fn parse_timestamp(segment: &str, prefix: char) -> Option<DateTime<Utc>> {
    let digits = segment.strip_prefix(prefix)?;
    if digits.len() != 14 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = digits[0..4].parse().ok()?;
    let ordinal: u32 = digits[4..7].parse().ok()?;
    let hour: u32 = digits[7..9].parse().ok()?;
    let minute: u32 = digits[9..11].parse().ok()?;
    let second: u32 = digits[11..13].parse().ok()?;
    let tenths: u32 = digits[13..14].parse().ok()?;

    let date = NaiveDate::from_yo_opt(year, ordinal)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, tenths * 100)?;
    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
