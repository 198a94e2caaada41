//! Etch entities: engraved lines and text.

use serde_json::json;

use super::ProjectItem;
use crate::error::{ApiError, Result};
use crate::geometry::Vector;

/// Text layout factors for [`EtchItem::add_text`].
///
/// All three are unitless multipliers applied by the server and are sent
/// unconverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub aspect: f64,
    pub spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 1.0,
            aspect: 1.0,
            spacing: 1.0,
        }
    }
}

/// A project item that holds etched geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct EtchItem {
    item: ProjectItem,
}

impl EtchItem {
    pub(crate) fn from_item(item: ProjectItem) -> Self {
        Self { item }
    }

    pub fn id(&self) -> &str {
        self.item.id()
    }

    /// Name, origin and parent accessors.
    pub fn as_item(&self) -> &ProjectItem {
        &self.item
    }

    pub fn into_item(self) -> ProjectItem {
        self.item
    }

    /// Etch a straight line. Points and `width` are in client units.
    pub async fn add_line(&self, start: Vector, end: Vector, width: f64) -> Result<()> {
        if !(width.is_finite() && width > 0.0) {
            return Err(ApiError::InvalidArgument(format!(
                "line width must be positive, got {}",
                width
            )));
        }

        let api = &self.item.interface;
        let params = json!([
            self.id(),
            api.convert_to_api(start),
            api.convert_to_api(end),
            api.convert_to_api(width),
        ]);
        api.invoke("EtchAddLine", params).await?;
        Ok(())
    }

    /// Etch `text` centered on `center`, rotated by `angle` radians.
    pub async fn add_text(
        &self,
        center: Vector,
        angle: f64,
        text: &str,
        style: TextStyle,
    ) -> Result<()> {
        let api = &self.item.interface;
        let params = json!([
            self.id(),
            api.convert_to_api(center),
            angle,
            text,
            style.size,
            style.aspect,
            style.spacing,
        ]);
        api.invoke("EtchAddText", params).await?;
        Ok(())
    }
}
