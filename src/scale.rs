//! Axis scaling: step sizing, tick generation, and the data-to-pixel
//! transform.

use tracing::warn;

/// Hard cap on generated major ticks, against pathological range/step
/// combinations.
const MAX_MAJOR_TICKS: i64 = 1000;

/// Hard cap on minor tick iterations past the first tick.
const MAX_MINOR_ITERATIONS: i64 = 300;

/// Smallest span a repaired range may have.
const MIN_SPAN: f64 = f64::EPSILON;

/// A labeled major graduation.
#[derive(Clone, Debug, PartialEq)]
pub struct MajorTick {
    pub value: f64,
    /// Offset in the scale's pixel convention (see [`Scale::data_to_pixel`]).
    pub pixel: f64,
    pub label: String,
}

/// An unlabeled minor graduation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinorTick {
    pub value: f64,
    pub pixel: f64,
}

/// Scaling state for one axis: data bounds, gesture staging bounds, step
/// sizes, and the pixel range of the current layout.
///
/// Bounds invariant: `min < max` strictly. The frame pass repairs
/// degenerate or inverted bounds through [`sanitize`] before any step or
/// transform computation runs.
///
/// [`sanitize`]: Scale::sanitize
#[derive(Clone, Debug)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    /// Staged minimum while a pan gesture is in progress.
    pub tmp_min: f64,
    /// Staged maximum while a pan gesture is in progress.
    pub tmp_max: f64,
    pub major_step: f64,
    pub minor_step: f64,
    min_pix: f64,
    max_pix: f64,
}

impl Scale {
    pub fn new() -> Self {
        Self {
            min: 0.0,
            max: 10.0,
            tmp_min: 0.0,
            tmp_max: 10.0,
            major_step: 1.0,
            minor_step: 0.1,
            min_pix: 0.0,
            max_pix: 0.0,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn tmp_span(&self) -> f64 {
        self.tmp_max - self.tmp_min
    }

    pub fn set_range(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    /// Stage the current bounds as the baseline of a gesture.
    pub fn stage(&mut self) {
        self.tmp_min = self.min;
        self.tmp_max = self.max;
    }

    /// Repair bounds that would break the transform: non-finite bounds are
    /// reset, inverted bounds swapped, and an empty span widened. Returns
    /// true when a repair was applied; the caller gets a diagnostic either
    /// way via `tracing`.
    pub fn sanitize(&mut self) -> bool {
        if !self.min.is_finite() || !self.max.is_finite() {
            warn!(min = self.min, max = self.max, "non-finite scale bounds reset");
            self.min = 0.0;
            self.max = 10.0;
            return true;
        }
        if self.max < self.min {
            warn!(min = self.min, max = self.max, "inverted scale bounds swapped");
            std::mem::swap(&mut self.min, &mut self.max);
            return true;
        }
        if self.span() < MIN_SPAN {
            warn!(value = self.min, "degenerate scale range widened");
            self.min -= 0.5;
            self.max += 0.5;
            return true;
        }
        false
    }

    /// Record the pixel extent of the chart edge this scale maps onto.
    /// X axes pass (left, right), Y axes pass (bottom, top).
    pub fn set_pixel_range(&mut self, min_pix: f64, max_pix: f64) {
        self.min_pix = min_pix;
        self.max_pix = max_pix;
    }

    pub fn pixel_span(&self) -> f64 {
        self.max_pix - self.min_pix
    }

    /// Device coordinate of the `min` end of the pixel range.
    pub fn pixel_min(&self) -> f64 {
        self.min_pix
    }

    /// Human-friendly step size: `range / target_steps` with the mantissa
    /// rounded up to the nearest of 1, 2, 5, 10.
    pub fn compute_step(range: f64, target_steps: f64) -> f64 {
        let range = if range.is_finite() && range > 0.0 {
            range
        } else {
            warn!(range, "non-positive range clamped before step computation");
            MIN_SPAN
        };
        let target_steps = if target_steps > 0.0 { target_steps } else { 1.0 };

        let temp_step = range / target_steps;
        let mag_pow = 10f64.powf(temp_step.log10().floor());
        let mantissa = temp_step / mag_pow;

        let msd = if mantissa > 5.0 {
            10.0
        } else if mantissa > 2.0 {
            5.0
        } else if mantissa > 1.0 {
            2.0
        } else {
            1.0
        };

        msd * mag_pow
    }

    /// Recompute the major and minor step from the current span.
    pub fn compute_steps(&mut self, target_major: f64, target_minor: f64) {
        self.major_step = Self::compute_step(self.span(), target_major);
        self.minor_step = Self::compute_step(self.major_step, target_minor);
    }

    /// Number of major ticks the current bounds produce, clamped to
    /// `[1, 1000]`.
    pub fn tick_count(&self) -> i64 {
        let n = (self.span() / self.major_step + 0.01) as i64 + 1;
        n.clamp(1, MAX_MAJOR_TICKS)
    }

    /// Labeled major ticks within `[min, max]`.
    pub fn major_ticks(&self) -> Vec<MajorTick> {
        let n = self.tick_count();
        let first = (self.min / self.major_step).ceil() as i64;
        let mut ticks = Vec::new();
        for i in first..first + n {
            let value = self.major_step * i as f64;
            if value < self.min {
                continue;
            }
            if value > self.max {
                break;
            }
            ticks.push(MajorTick {
                value,
                pixel: self.data_to_pixel(value),
                label: self.format_label(value),
            });
        }
        ticks
    }

    /// Minor ticks across the scale. Starts at
    /// `floor(min / minor_step) * minor_step` so the first tick may sit
    /// just below the window; ticks coinciding with a major tick are
    /// suppressed. The major comparison cursor advances one step at a
    /// time, seeded at the first major multiple at or below the start.
    pub fn minor_ticks(&self) -> Vec<MinorTick> {
        let step = self.minor_step;
        if !(step > 0.0) || !step.is_finite() {
            return Vec::new();
        }
        let first_index = (self.min / step).floor() as i64;
        let mut major_index = (step * first_index as f64 / self.major_step).floor() as i64;
        let mut major_val = self.major_step * major_index as f64;

        let mut ticks = Vec::new();
        let mut value = self.min;
        let mut i = first_index;
        while value < self.max && i < first_index + MAX_MINOR_ITERATIONS {
            value = step * i as f64;
            if value > major_val {
                major_index += 1;
                major_val = self.major_step * major_index as f64;
            }
            let coincides = if value.abs() < 1e-20 {
                (value - major_val).abs() <= 1e-20
            } else {
                ((value - major_val) / value).abs() <= 1e-10
            };
            if !coincides {
                ticks.push(MinorTick {
                    value,
                    pixel: self.data_to_pixel(value),
                });
            }
            i += 1;
        }
        ticks
    }

    /// Tick label with precision tiered by the axis span:
    /// span > 8 → 0 decimals, > 0.8 → 1, > 0.08 → 2, else 3.
    pub fn format_label(&self, value: f64) -> String {
        let span = self.span();
        if span > 8.0 {
            format!("{value:.0}")
        } else if span > 0.8 {
            format!("{value:.1}")
        } else if span > 0.08 {
            format!("{value:.2}")
        } else {
            format!("{value:.3}")
        }
    }

    /// Offset of a data value within the pixel range, measured from the
    /// `max_pix` end: `(max_pix - min_pix) * (1 - (v - min) / (max - min))`.
    /// Monotonically decreasing in `value`.
    pub fn data_to_pixel(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return 0.0;
        }
        let ratio = (value - self.min) / span;
        (self.max_pix - self.min_pix) * (1.0 - ratio)
    }

    /// Data value under a device coordinate along this axis (X axes take a
    /// screen x, Y axes a screen y).
    pub fn device_to_data(&self, device: f64) -> f64 {
        let pixel_span = self.pixel_span();
        if pixel_span == 0.0 {
            return self.min;
        }
        self.min + (device - self.min_pix) / pixel_span * self.span()
    }

    /// Device coordinate of a data value along this axis.
    pub fn data_to_device(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            return self.min_pix;
        }
        self.min_pix + (value - self.min) / span * self.pixel_span()
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new()
    }
}
