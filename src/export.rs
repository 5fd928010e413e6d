//! Frame export as CSV, JSON or plain text

use std::str::FromStr;
use chrono::NaiveDate;
use serde::Serialize;
use crate::format::price_label;
use crate::frame::Frame;
use crate::storage::FrameStore;
use crate::{Error, Result};

/// Largest number of rows a single export returns
pub const MAX_EXPORT_ROWS: usize = 2000;

/// Rows exported when no limit is given
pub const DEFAULT_EXPORT_ROWS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    /// Plain lines; short exports may be sent inline
    Text,
    /// Plain lines, always delivered as a file
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text | ExportFormat::Txt => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "text" => Ok(ExportFormat::Text),
            "txt" => Ok(ExportFormat::Txt),
            _ => Err(Error::validation(format!("unknown export format '{}' (csv, json, text, txt)", s))),
        }
    }
}

/// What to export and how
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub limit: usize,
    /// Exact brand, ignoring case
    pub brand: Option<String>,
    /// Only frames created on or after this day
    pub since: Option<NaiveDate>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            limit: DEFAULT_EXPORT_ROWS,
            brand: None,
            since: None,
        }
    }
}

impl ExportOptions {
    /// Parse `N` or `format=json limit=200 brand=Ray since=2025-01-01`
    pub fn parse_args(args: &str) -> Result<Self> {
        let mut opts = Self::default();
        let args = args.trim();
        if args.is_empty() {
            return Ok(opts);
        }
        if let Ok(n) = args.parse::<usize>() {
            opts.limit = clamp_limit(n);
            return Ok(opts);
        }
        for (key, value) in crate::fields::parse_pairs(args)? {
            match key.as_str() {
                "format" => opts.format = value.parse()?,
                "limit" => {
                    let n = value.trim().parse::<usize>().map_err(|_| {
                        Error::validation(format!("limit must be a whole number, got '{}'", value))
                    })?;
                    opts.limit = clamp_limit(n);
                }
                "brand" => opts.brand = Some(value).filter(|b| !b.trim().is_empty()),
                "since" => opts.since = Some(parse_date(&value)?),
                other => return Err(Error::validation(format!("unrecognized export option '{}'", other))),
            }
        }
        Ok(opts)
    }

    /// Fetch matching frames from the store
    pub fn fetch(&self, store: &FrameStore) -> Result<Vec<Frame>> {
        store.export_rows(self.brand.as_deref(), self.since, clamp_limit(self.limit))
    }
}

pub fn clamp_limit(n: usize) -> usize {
    n.clamp(1, MAX_EXPORT_ROWS)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::validation(format!("since must be a date like 2025-01-31, got '{}'", raw)))
}

/// Suggested file name for an export of `count` frames
pub fn file_name(format: ExportFormat, count: usize) -> String {
    format!("frames_export_{}.{}", count, format.extension())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: i64,
    brand: Option<&'a str>,
    model_code: &'a str,
    material: Option<&'a str>,
    lens_width: Option<i64>,
    bridge_size: Option<i64>,
    temple_length: Option<i64>,
    color: Option<&'a str>,
    shape: Option<&'a str>,
    gender: Option<&'a str>,
    price: Option<f64>,
    stock: i64,
    notes: Option<&'a str>,
    created_at: String,
}

impl<'a> From<&'a Frame> for CsvRow<'a> {
    fn from(f: &'a Frame) -> Self {
        Self {
            id: f.id,
            brand: f.brand.as_deref(),
            model_code: &f.model_code,
            material: f.material.as_deref(),
            lens_width: f.lens_width,
            bridge_size: f.bridge_size,
            temple_length: f.temple_length,
            color: f.color.as_deref(),
            shape: f.shape.as_deref(),
            gender: f.gender.as_deref(),
            price: f.price,
            stock: f.stock,
            notes: f.notes.as_deref(),
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

/// Render frames in the requested format
pub fn render(frames: &[Frame], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for frame in frames {
                writer.serialize(CsvRow::from(frame))?;
            }
            writer
                .into_inner()
                .map_err(|e| Error::Serialization(e.to_string()))
        }
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(frames)?),
        ExportFormat::Text | ExportFormat::Txt => {
            let lines: Vec<String> = frames
                .iter()
                .map(|f| {
                    format!(
                        "{}: {} {} stock={} price={}",
                        f.id,
                        f.brand_label(),
                        f.model_code,
                        f.stock,
                        price_label(f.price)
                    )
                })
                .collect();
            Ok(lines.join("\n").into_bytes())
        }
    }
}
