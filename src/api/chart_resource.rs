use serde::{Deserialize, Serialize};

use crate::core::{ChartSnapshot, DataPoint, LinearScale, PixelRange, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::{ChartHandleId, ScatterChartConfig, SurfaceId};

const LEGEND_SWATCH_PX: f64 = 12.0;
const TICK_LENGTH_PX: f64 = 5.0;

/// Plot rectangle inside the viewport, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_config(config: &ScatterChartConfig) -> ChartResult<Self> {
        let Viewport { width, height } = config.viewport;
        let margins = config.margins;
        let area = Self {
            left: margins.left_px,
            top: margins.top_px,
            width: f64::from(width) - margins.left_px - margins.right_px,
            height: f64::from(height) - margins.top_px - margins.bottom_px,
        };
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot area must have a positive size".to_owned(),
            ));
        }
        Ok(area)
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn x_range(self) -> PixelRange {
        PixelRange::new(self.left, self.right())
    }

    /// Vertical range runs bottom to top so larger values are drawn higher.
    #[must_use]
    pub fn y_range(self) -> PixelRange {
        PixelRange::new(self.bottom(), self.top)
    }
}

/// Rendered geometry of one mark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkGeometry {
    /// Position of the product in the snapshot the mark was drawn from.
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl MarkGeometry {
    #[must_use]
    pub fn distance_to(self, x: f64, y: f64) -> f64 {
        (self.cx - x).hypot(self.cy - y)
    }
}

/// Pure layout of a chart for one snapshot: scales, marks and the frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ChartLayout {
    pub(crate) plot: PlotArea,
    pub(crate) x_scale: LinearScale,
    pub(crate) y_scale: LinearScale,
    pub(crate) marks: Vec<MarkGeometry>,
    pub(crate) frame: RenderFrame,
}

impl ChartLayout {
    pub(crate) fn build(config: &ScatterChartConfig, snapshot: &ChartSnapshot) -> ChartResult<Self> {
        config.validate()?;
        if !snapshot.is_aligned() {
            return Err(ChartError::InvalidData(
                "snapshot series lengths differ".to_owned(),
            ));
        }

        let plot = PlotArea::from_config(config)?;
        let x_scale =
            LinearScale::from_values(snapshot.xs().iter().copied(), config.domain_padding_ratio)?;
        let y_scale =
            LinearScale::from_values(snapshot.ys().iter().copied(), config.domain_padding_ratio)?;

        let mut marks = Vec::with_capacity(snapshot.len());
        for (index, point) in snapshot.points().enumerate() {
            let (cx, cy) = project_point(x_scale, y_scale, plot, point)?;
            marks.push(MarkGeometry {
                index,
                cx,
                cy,
                radius: config.point_radius_px,
            });
        }

        let frame = build_frame(config, plot, x_scale, y_scale, &marks)?;
        Ok(Self {
            plot,
            x_scale,
            y_scale,
            marks,
            frame,
        })
    }
}

/// One live chart bound to a drawing surface.
///
/// The resource is created by `ChartLifecycleManager::render` and dropped by
/// `ChartLifecycleManager::destroy`; its marks are indexed by position in the
/// snapshot it was rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartResource {
    handle: ChartHandleId,
    surface: SurfaceId,
    plot: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
    marks: Vec<MarkGeometry>,
    hit_radius_px: f64,
}

impl ChartResource {
    pub(crate) fn from_layout(
        handle: ChartHandleId,
        surface: SurfaceId,
        layout: ChartLayout,
        hit_radius_px: f64,
    ) -> Self {
        Self {
            handle,
            surface,
            plot: layout.plot,
            x_scale: layout.x_scale,
            y_scale: layout.y_scale,
            marks: layout.marks,
            hit_radius_px,
        }
    }

    #[must_use]
    pub fn handle(&self) -> ChartHandleId {
        self.handle
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    #[must_use]
    pub fn plot_area(&self) -> PlotArea {
        self.plot
    }

    #[must_use]
    pub fn x_domain(&self) -> (f64, f64) {
        self.x_scale.domain()
    }

    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        self.y_scale.domain()
    }

    #[must_use]
    pub fn marks(&self) -> &[MarkGeometry] {
        &self.marks
    }

    #[must_use]
    pub fn mark(&self, index: usize) -> Option<MarkGeometry> {
        self.marks.get(index).copied()
    }

    #[must_use]
    pub fn hit_radius_px(&self) -> f64 {
        self.hit_radius_px
    }

    /// Maps a data-space point to surface pixels.
    pub fn data_to_pixel(&self, point: DataPoint) -> ChartResult<(f64, f64)> {
        project_point(self.x_scale, self.y_scale, self.plot, point)
    }

    /// Maps surface pixels back to data space.
    pub fn pixel_to_data(&self, x: f64, y: f64) -> ChartResult<DataPoint> {
        Ok(DataPoint::new(
            self.x_scale.pixel_to_domain(x, self.plot.x_range())?,
            self.y_scale.pixel_to_domain(y, self.plot.y_range())?,
        ))
    }
}

fn project_point(
    x_scale: LinearScale,
    y_scale: LinearScale,
    plot: PlotArea,
    point: DataPoint,
) -> ChartResult<(f64, f64)> {
    Ok((
        x_scale.domain_to_pixel(point.x, plot.x_range())?,
        y_scale.domain_to_pixel(point.y, plot.y_range())?,
    ))
}

fn build_frame(
    config: &ScatterChartConfig,
    plot: PlotArea,
    x_scale: LinearScale,
    y_scale: LinearScale,
    marks: &[MarkGeometry],
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(config.viewport);
    let font = config.font_size_px;

    for value in x_scale.ticks(config.tick_target_count) {
        let x = x_scale.domain_to_pixel(value, plot.x_range())?;
        frame = frame
            .with_line(LinePrimitive::new(
                x,
                plot.top,
                x,
                plot.bottom() + TICK_LENGTH_PX,
                1.0,
                config.grid_color,
            ))
            .with_text(TextPrimitive::new(
                format_tick(value),
                x,
                plot.bottom() + TICK_LENGTH_PX + 2.0,
                font,
                config.text_color,
                TextHAlign::Center,
            ));
    }
    for value in y_scale.ticks(config.tick_target_count) {
        let y = y_scale.domain_to_pixel(value, plot.y_range())?;
        frame = frame
            .with_line(LinePrimitive::new(
                plot.left - TICK_LENGTH_PX,
                y,
                plot.right(),
                y,
                1.0,
                config.grid_color,
            ))
            .with_text(TextPrimitive::new(
                format_tick(value),
                plot.left - TICK_LENGTH_PX - 3.0,
                y - font / 2.0,
                font,
                config.text_color,
                TextHAlign::Right,
            ));
    }

    // Axis lines: x along the bottom edge, y along the left edge.
    frame = frame
        .with_line(LinePrimitive::new(
            plot.left,
            plot.bottom(),
            plot.right(),
            plot.bottom(),
            1.0,
            config.axis_color,
        ))
        .with_line(LinePrimitive::new(
            plot.left,
            plot.top,
            plot.left,
            plot.bottom(),
            1.0,
            config.axis_color,
        ));

    if config.x_axis_title.display && !config.x_axis_title.text.is_empty() {
        frame = frame.with_text(TextPrimitive::new(
            config.x_axis_title.text.clone(),
            plot.left + plot.width / 2.0,
            plot.bottom() + TICK_LENGTH_PX + font * 2.0,
            font,
            config.text_color,
            TextHAlign::Center,
        ));
    }
    if config.y_axis_title.display && !config.y_axis_title.text.is_empty() {
        frame = frame.with_text(
            TextPrimitive::new(
                config.y_axis_title.text.clone(),
                font,
                plot.top + plot.height / 2.0,
                font,
                config.text_color,
                TextHAlign::Center,
            )
            .rotated(90.0),
        );
    }

    if !config.dataset_label.is_empty() {
        let center_x = f64::from(config.viewport.width) / 2.0;
        frame = frame
            .with_rect(RectPrimitive::new(
                center_x - LEGEND_SWATCH_PX - 4.0,
                8.0,
                LEGEND_SWATCH_PX,
                LEGEND_SWATCH_PX,
                config.mark_color,
            ))
            .with_text(TextPrimitive::new(
                config.dataset_label.clone(),
                center_x,
                8.0,
                font,
                config.text_color,
                TextHAlign::Left,
            ));
    }

    for mark in marks {
        frame = frame.with_circle(CirclePrimitive::new(
            mark.cx,
            mark.cy,
            mark.radius,
            config.mark_color,
        ));
    }

    frame.validate()?;
    Ok(frame)
}

fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let text = format!("{value:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Product;

    #[test]
    fn tick_labels_drop_trailing_zeros() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(4.0), "4");
        assert_eq!(format_tick(0.25), "0.25");
        assert_eq!(format_tick(-1.5), "-1.5");
    }

    #[test]
    fn layout_places_one_mark_per_product_inside_plot() {
        let config = ScatterChartConfig::default();
        let snapshot = ChartSnapshot::from_products(&[
            Product::new("a", "p1", 2.0, 3.0),
            Product::new("b", "p2", 10.0, -4.0),
        ]);
        let layout = ChartLayout::build(&config, &snapshot).expect("layout");

        assert_eq!(layout.marks.len(), 2);
        assert_eq!(layout.frame.circles.len(), 2);
        for mark in &layout.marks {
            assert!(mark.cx >= layout.plot.left && mark.cx <= layout.plot.right());
            assert!(mark.cy >= layout.plot.top && mark.cy <= layout.plot.bottom());
        }
        // The higher y value sits closer to the top edge.
        assert!(layout.marks[0].cy < layout.marks[1].cy);
    }

    #[test]
    fn layout_draws_axis_titles() {
        let config = ScatterChartConfig::default();
        let snapshot = ChartSnapshot::from_products(&[Product::new("a", "p1", 2.0, 3.0)]);
        let layout = ChartLayout::build(&config, &snapshot).expect("layout");

        let texts: Vec<&str> = layout
            .frame
            .texts
            .iter()
            .map(|text| text.text.as_str())
            .collect();
        assert!(texts.contains(&"x-coordinate"));
        assert!(texts.contains(&"y-coordinate"));
        assert!(texts.contains(&"Products"));
    }
}
