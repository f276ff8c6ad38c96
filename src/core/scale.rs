use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel interval an axis is laid out on.
///
/// `start` maps to the domain start and `end` to the domain end, so a vertical
/// axis uses `start > end` (bottom to top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRange {
    pub start: f64,
    pub end: f64,
}

impl PixelRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    fn validate(self) -> ChartResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start == self.end {
            return Err(ChartError::InvalidData(
                "pixel range must be finite and non-empty".to_owned(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite()
            || !domain_end.is_finite()
            || half_span(domain_start, domain_end) == 0.0
        {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Fits a domain around `values`.
    ///
    /// An empty input yields `[0, 1]`. When all values are equal the domain is
    /// widened on each side by one unit, or by a few ulps once one unit no
    /// longer moves the value; otherwise the span is padded by `padding_ratio`
    /// on both ends. Bounds are clamped to the finite `f64` range.
    pub fn from_values(
        values: impl IntoIterator<Item = f64>,
        padding_ratio: f64,
    ) -> ChartResult<Self> {
        if !padding_ratio.is_finite() || padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "scale padding ratio must be finite and >= 0".to_owned(),
            ));
        }

        let mut bounds: Option<(f64, f64)> = None;
        for value in values {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(
                    "scale values must be finite".to_owned(),
                ));
            }
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }

        let Some((min, max)) = bounds else {
            return Self::new(0.0, 1.0);
        };
        if half_span(min, max) == 0.0 {
            let widen = (max.abs() * f64::EPSILON * 4.0).max(1.0);
            return Self::new(clamp_finite(min - widen), clamp_finite(max + widen));
        }

        let padding = half_span(min, max) * padding_ratio * 2.0;
        Self::new(clamp_finite(min - padding), clamp_finite(max + padding))
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, range: PixelRange) -> ChartResult<f64> {
        range.validate()?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = half_span(self.domain_start, value)
            / half_span(self.domain_start, self.domain_end);
        Ok(range.start + normalized * range.span())
    }

    pub fn pixel_to_domain(self, pixel: f64, range: PixelRange) -> ChartResult<f64> {
        range.validate()?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - range.start) / range.span();
        Ok(self.domain_start * (1.0 - normalized) + self.domain_end * normalized)
    }

    /// Returns round tick values (1, 2 or 5 times a power of ten) inside the domain.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> Vec<f64> {
        let (min, max) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        let target_count = target_count.max(2);
        let step = nice_step(half_span(min, max) / (target_count - 1) as f64 * 2.0);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }

        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        (first..=last)
            .map(|index| {
                let value = index as f64 * step;
                // Snap accumulated float error back onto the step grid.
                (value / step).round() * step
            })
            .collect()
    }
}

/// Half of `end - start`, finite for any finite inputs.
fn half_span(start: f64, end: f64) -> f64 {
    end / 2.0 - start / 2.0
}

fn clamp_finite(value: f64) -> f64 {
    value.clamp(f64::MIN, f64::MAX)
}

fn nice_step(raw_step: f64) -> f64 {
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return 0.0;
    }
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}
