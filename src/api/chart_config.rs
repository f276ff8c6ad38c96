use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

pub const DEFAULT_X_AXIS_TITLE: &str = "x-coordinate";
pub const DEFAULT_Y_AXIS_TITLE: &str = "y-coordinate";
pub const DEFAULT_DATASET_LABEL: &str = "Products";

/// Title settings for one linear axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

impl AxisTitle {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            display: true,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.display = false;
        self
    }
}

/// Space reserved around the plot area for axes, titles and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotMargins {
    pub left_px: f64,
    pub right_px: f64,
    pub top_px: f64,
    pub bottom_px: f64,
}

impl Default for PlotMargins {
    fn default() -> Self {
        Self {
            left_px: 64.0,
            right_px: 16.0,
            top_px: 36.0,
            bottom_px: 52.0,
        }
    }
}

/// Configuration of the scatter chart drawn for the product collection.
///
/// The chart always has a linear x axis at the bottom and a linear y axis on
/// the left, with a single data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterChartConfig {
    pub viewport: Viewport,
    pub dataset_label: String,
    pub x_axis_title: AxisTitle,
    pub y_axis_title: AxisTitle,
    /// Drawn mark radius in pixels.
    pub point_radius_px: f64,
    /// Extra pickable distance around each mark, in pixels.
    pub hit_radius_px: f64,
    /// Fraction of the data span added on both ends of each axis.
    pub domain_padding_ratio: f64,
    pub tick_target_count: usize,
    pub margins: PlotMargins,
    pub mark_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub text_color: Color,
    pub font_size_px: f64,
}

impl Default for ScatterChartConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(800, 400),
            dataset_label: DEFAULT_DATASET_LABEL.to_owned(),
            x_axis_title: AxisTitle::new(DEFAULT_X_AXIS_TITLE),
            y_axis_title: AxisTitle::new(DEFAULT_Y_AXIS_TITLE),
            point_radius_px: 3.0,
            hit_radius_px: 1.0,
            domain_padding_ratio: 0.05,
            tick_target_count: 6,
            margins: PlotMargins::default(),
            mark_color: Color::from_rgba8(75, 192, 192, 0.6),
            axis_color: Color::rgba(0.0, 0.0, 0.0, 0.25),
            grid_color: Color::rgba(0.0, 0.0, 0.0, 0.1),
            text_color: Color::from_rgba8(102, 102, 102, 1.0),
            font_size_px: 12.0,
        }
    }
}

impl ScatterChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dataset_label(mut self, label: impl Into<String>) -> Self {
        self.dataset_label = label.into();
        self
    }

    #[must_use]
    pub fn with_axis_titles(mut self, x_axis_title: AxisTitle, y_axis_title: AxisTitle) -> Self {
        self.x_axis_title = x_axis_title;
        self.y_axis_title = y_axis_title;
        self
    }

    #[must_use]
    pub fn with_point_radius(mut self, point_radius_px: f64) -> Self {
        self.point_radius_px = point_radius_px;
        self
    }

    #[must_use]
    pub fn with_hit_radius(mut self, hit_radius_px: f64) -> Self {
        self.hit_radius_px = hit_radius_px;
        self
    }

    #[must_use]
    pub fn with_domain_padding_ratio(mut self, ratio: f64) -> Self {
        self.domain_padding_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: PlotMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_mark_color(mut self, color: Color) -> Self {
        self.mark_color = color;
        self
    }

    /// Loads a config from JSON; missing fields fall back to defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.point_radius_px.is_finite() || self.point_radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "point radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.hit_radius_px.is_finite() || self.hit_radius_px < 0.0 {
            return Err(ChartError::InvalidData(
                "hit radius must be finite and >= 0".to_owned(),
            ));
        }
        if !self.domain_padding_ratio.is_finite() || self.domain_padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "domain padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if self.tick_target_count < 2 {
            return Err(ChartError::InvalidData(
                "tick target count must be >= 2".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        let PlotMargins {
            left_px,
            right_px,
            top_px,
            bottom_px,
        } = self.margins;
        if [left_px, right_px, top_px, bottom_px]
            .iter()
            .any(|margin| !margin.is_finite() || *margin < 0.0)
        {
            return Err(ChartError::InvalidData(
                "plot margins must be finite and >= 0".to_owned(),
            ));
        }
        if left_px + right_px >= f64::from(self.viewport.width)
            || top_px + bottom_px >= f64::from(self.viewport.height)
        {
            return Err(ChartError::InvalidData(
                "plot margins leave no room for the plot area".to_owned(),
            ));
        }
        for color in [
            self.mark_color,
            self.axis_color,
            self.grid_color,
            self.text_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}
