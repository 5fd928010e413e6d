//! Search criteria as supplied by a front end

use crate::query::filter::{FrameFilter, TextField};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Optional search criteria. Unset criteria impose no constraint; an empty
/// set matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub brand: Option<String>,
    pub model_code: Option<String>,
    pub material: Option<String>,
    pub color: Option<String>,
    pub shape: Option<String>,
    pub gender: Option<String>,
    /// Inclusive lower bound on price
    pub min_price: Option<f64>,
    /// Inclusive upper bound on price
    pub max_price: Option<f64>,
    /// Exact lens width in millimeters
    pub lens_width: Option<i64>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn model_code(mut self, model_code: impl Into<String>) -> Self {
        self.model_code = Some(model_code.into());
        self
    }

    pub fn material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = Some(shape.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn min_price(mut self, price: f64) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: f64) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn lens_width(mut self, mm: i64) -> Self {
        self.lens_width = Some(mm);
        self
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate the criteria and normalize them into a filter.
    ///
    /// Blank text criteria are dropped. Fails when a price bound is not a
    /// finite number or when `min_price` exceeds `max_price`.
    pub fn into_filter(self) -> Result<FrameFilter> {
        for (name, bound) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if let Some(v) = bound {
                if !v.is_finite() {
                    return Err(Error::validation(format!("{} must be a finite number, got {}", name, v)));
                }
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(Error::validation(format!(
                    "min_price ({}) must not exceed max_price ({})",
                    min, max
                )));
            }
        }

        let text = [
            (TextField::Brand, self.brand),
            (TextField::ModelCode, self.model_code),
            (TextField::Material, self.material),
            (TextField::Color, self.color),
            (TextField::Shape, self.shape),
            (TextField::Gender, self.gender),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            let value = value?.trim().to_string();
            (!value.is_empty()).then_some((field, value))
        })
        .collect();

        Ok(FrameFilter::new(text, self.min_price, self.max_price, self.lens_width))
    }
}
