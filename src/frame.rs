//! Frame record model
//!
//! A `NewFrame` is a candidate record collected by a front end. Once the
//! storage engine persists it, it comes back as a `Frame` carrying the
//! system-assigned id and creation timestamp.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary identity of a persisted frame
pub type FrameId = i64;

/// Materials offered when prompting. The model itself accepts any text.
pub const MATERIAL_CHOICES: &[&str] = &[
    "plastic",
    "acetate",
    "metal",
    "stainless steel",
    "titanium",
    "aluminum",
    "wood",
    "carbon fiber",
    "other",
    "unknown",
];

/// Attributes of a frame, everything except the storage-assigned identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewFrame {
    pub brand: Option<String>,
    pub model_code: String,
    pub material: Option<String>,
    /// Lens width in millimeters
    pub lens_width: Option<i64>,
    /// Bridge size in millimeters
    pub bridge_size: Option<i64>,
    /// Temple length in millimeters
    pub temple_length: Option<i64>,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub gender: Option<String>,
    pub price: Option<f64>,
    pub stock: i64,
    pub notes: Option<String>,
}

impl NewFrame {
    /// Start building a frame for the given model code
    pub fn builder(model_code: impl Into<String>) -> FrameBuilder {
        FrameBuilder::new(model_code)
    }

    /// Check the record invariants: non-empty model code, non-negative numerics.
    pub fn validate(&self) -> Result<()> {
        if self.model_code.trim().is_empty() {
            return Err(Error::validation("model_code must not be empty"));
        }
        check_non_negative("lens_width", self.lens_width)?;
        check_non_negative("bridge_size", self.bridge_size)?;
        check_non_negative("temple_length", self.temple_length)?;
        check_non_negative("stock", Some(self.stock))?;
        if let Some(price) = self.price {
            check_price(price)?;
        }
        Ok(())
    }

    /// Brand for display, `NoBrand` when unknown
    pub fn brand_label(&self) -> &str {
        self.brand.as_deref().unwrap_or("NoBrand")
    }

    /// Material for display, `unknown` when absent
    pub fn material_label(&self) -> &str {
        self.material.as_deref().unwrap_or("unknown")
    }

    /// The `lens-bridge-temple` size triple, `-` for missing parts
    pub fn size_label(&self) -> String {
        fn part(v: Option<i64>) -> String {
            v.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
        }
        format!(
            "{}-{}-{}",
            part(self.lens_width),
            part(self.bridge_size),
            part(self.temple_length)
        )
    }
}

fn check_non_negative(field: &str, value: Option<i64>) -> Result<()> {
    match value {
        Some(v) if v < 0 => Err(Error::validation(format!(
            "{} must not be negative, got {}",
            field, v
        ))),
        _ => Ok(()),
    }
}

fn check_price(price: f64) -> Result<()> {
    if !price.is_finite() {
        return Err(Error::validation(format!("price must be a finite number, got {}", price)));
    }
    if price < 0.0 {
        return Err(Error::validation(format!("price must not be negative, got {}", price)));
    }
    Ok(())
}

/// Fluent construction of a validated `NewFrame`.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    frame: NewFrame,
}

impl FrameBuilder {
    pub fn new(model_code: impl Into<String>) -> Self {
        Self {
            frame: NewFrame {
                model_code: model_code.into(),
                ..NewFrame::default()
            },
        }
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.frame.brand = Some(brand.into());
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.frame.material = Some(material.into());
        self
    }

    pub fn lens_width(mut self, mm: i64) -> Self {
        self.frame.lens_width = Some(mm);
        self
    }

    pub fn bridge_size(mut self, mm: i64) -> Self {
        self.frame.bridge_size = Some(mm);
        self
    }

    pub fn temple_length(mut self, mm: i64) -> Self {
        self.frame.temple_length = Some(mm);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.frame.color = Some(color.into());
        self
    }

    pub fn shape(mut self, shape: impl Into<String>) -> Self {
        self.frame.shape = Some(shape.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.frame.gender = Some(gender.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.frame.price = Some(price);
        self
    }

    pub fn stock(mut self, stock: i64) -> Self {
        self.frame.stock = stock;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.frame.notes = Some(notes.into());
        self
    }

    /// Validate and produce the frame
    pub fn build(self) -> Result<NewFrame> {
        self.frame.validate()?;
        Ok(self.frame)
    }
}

/// A persisted frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    #[serde(flatten)]
    pub attrs: NewFrame,
    pub created_at: DateTime<Utc>,
}

impl std::ops::Deref for Frame {
    type Target = NewFrame;

    fn deref(&self) -> &NewFrame {
        &self.attrs
    }
}
