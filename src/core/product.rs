use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Store-assigned product identifier.
///
/// Identity is the only key used for equality and selection; labels and
/// coordinates may repeat across products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One labeled 2-D point as held by the product store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub label: String,
    #[serde(rename = "xCoordinates")]
    pub x: f64,
    #[serde(rename = "yCoordinates")]
    pub y: f64,
}

impl Product {
    #[must_use]
    pub fn new(id: impl Into<ProductId>, label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
        }
    }

    #[must_use]
    pub fn point(&self) -> DataPoint {
        DataPoint::new(self.x, self.y)
    }

    #[must_use]
    pub fn draft(&self) -> ProductDraft {
        ProductDraft {
            label: self.label.clone(),
            x: self.x,
            y: self.y,
        }
    }
}

/// Product fields without an identifier, as submitted on create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub label: String,
    #[serde(rename = "xCoordinates")]
    pub x: f64,
    #[serde(rename = "yCoordinates")]
    pub y: f64,
}

impl ProductDraft {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> ChartResult<Self> {
        let draft = Self {
            label: label.into(),
            x,
            y,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Builds a draft from the raw text inputs of an edit form.
    ///
    /// All three fields are required; coordinates must parse as finite numbers.
    pub fn from_form_inputs(label: &str, x: &str, y: &str) -> ChartResult<Self> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ChartError::InvalidData("label is required".to_owned()));
        }
        let x = parse_coordinate(x, "x-coordinate")?;
        let y = parse_coordinate(y, "y-coordinate")?;
        Self::new(label, x, y)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.label.trim().is_empty() {
            return Err(ChartError::InvalidData("label is required".to_owned()));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_id(self, id: impl Into<ProductId>) -> Product {
        Product {
            id: id.into(),
            label: self.label,
            x: self.x,
            y: self.y,
        }
    }
}

fn parse_coordinate(raw: &str, field_name: &str) -> ChartResult<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ChartError::InvalidData(format!("{field_name} is required")));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| ChartError::InvalidData(format!("{field_name} must be a number")))?;
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "{field_name} must be finite"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_inputs_are_trimmed_and_parsed() {
        let draft = ProductDraft::from_form_inputs("  p1 ", " 2 ", "-3.5").expect("valid draft");
        assert_eq!(draft.label, "p1");
        assert_eq!(draft.x, 2.0);
        assert_eq!(draft.y, -3.5);
    }

    #[test]
    fn form_inputs_reject_missing_or_non_numeric_fields() {
        assert!(ProductDraft::from_form_inputs("", "1", "2").is_err());
        assert!(ProductDraft::from_form_inputs("p", "", "2").is_err());
        assert!(ProductDraft::from_form_inputs("p", "1", "abc").is_err());
        assert!(ProductDraft::from_form_inputs("p", "inf", "2").is_err());
    }

    #[test]
    fn product_uses_store_field_names_on_the_wire() {
        let product = Product::new("abc", "p1", 2.0, 3.0);
        let json = serde_json::to_value(&product).expect("serialize");
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["xCoordinates"], 2.0);
        assert_eq!(json["yCoordinates"], 3.0);
    }
}
