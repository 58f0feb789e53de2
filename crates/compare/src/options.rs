use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

pub const DEFAULT_THUMB_SIZE_PX: f64 = 42.0;
pub const DEFAULT_PADDING_PX: f64 = 0.0;

/// Control configuration.
///
/// Field names serialize in camelCase (`thumbSize`, `padding`) and each
/// field falls back to its default when absent.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SideBySideOptions {
    /// Width of the slider thumb in pixels.
    pub thumb_size: f64,
    /// Horizontal padding applied to both ends of the slider, in pixels.
    pub padding: f64,
}

impl Default for SideBySideOptions {
    fn default() -> Self {
        Self {
            thumb_size: DEFAULT_THUMB_SIZE_PX,
            padding: DEFAULT_PADDING_PX,
        }
    }
}

impl SideBySideOptions {
    pub fn new(thumb_size: f64, padding: f64) -> Result<Self, OptionsError> {
        let options = Self {
            thumb_size,
            padding,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn from_json(text: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        check_size("thumbSize", self.thumb_size)?;
        check_size("padding", self.padding)
    }

    /// Horizontal space the thumb occupies including padding on both ends.
    pub fn thumb_footprint(&self) -> f64 {
        2.0 * self.padding + self.thumb_size
    }
}

fn check_size(field: &'static str, value: f64) -> Result<(), OptionsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OptionsError::InvalidSize { field, value })
    }
}
