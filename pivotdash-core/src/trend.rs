//! Compact one-line trend for a cell's time series, drawn with block glyphs.

use crate::model::{Cell, PeriodOrder};

pub const TREND_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Headroom above the peak and below a negative trough.
const TREND_PADDING: f64 = 1.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Trend {
    pub glyphs: String,
    /// Sign of the most recent value, used to pick the trend color
    pub positive: bool,
}

impl Trend {
    /// Trend over the cell's values, oldest first, keeping at most the last
    /// `max_width` periods. `None` when the cell has fewer than two points.
    pub fn for_cell(cell: &Cell, order: &PeriodOrder, max_width: usize) -> Option<Self> {
        let values: Vec<f64> = cell
            .chronological(order)
            .into_iter()
            .map(|p| p.value)
            .collect();
        if values.len() < 2 || max_width == 0 {
            return None;
        }

        let recent = &values[values.len().saturating_sub(max_width)..];
        Some(Self {
            glyphs: trend_glyphs(recent),
            positive: recent.last().is_some_and(|v| *v >= 0.0),
        })
    }
}

/// Map each value to a glyph on a scale running from zero (or the padded
/// minimum when negative) up to the padded maximum.
pub fn trend_glyphs(values: &[f64]) -> String {
    let (lo, hi) = values
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let (lo, hi) = (lo * TREND_PADDING, hi * TREND_PADDING);
    let span = hi - lo;
    let top = TREND_GLYPHS.len() - 1;

    values
        .iter()
        .map(|v| {
            if span <= 0.0 || !v.is_finite() {
                return TREND_GLYPHS[0];
            }
            let level = ((v - lo) / span * top as f64).round();
            TREND_GLYPHS[(level.max(0.0) as usize).min(top)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    #[test]
    fn test_rising_series_climbs_the_glyphs() {
        assert_eq!(trend_glyphs(&[0.0, 50.0, 100.0]), "▁▄▇");
    }

    #[test]
    fn test_negative_values_sit_below_zero_baseline() {
        // Scale runs from -110 to 0
        assert_eq!(trend_glyphs(&[-100.0, 0.0]), "▂█");
    }

    #[test]
    fn test_flat_zero_series() {
        assert_eq!(trend_glyphs(&[0.0, 0.0, 0.0]), "▁▁▁");
        assert_eq!(trend_glyphs(&[]), "");
    }

    #[test]
    fn test_cell_trend_follows_axis_order_and_width() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("10", 100.0),
            Point::new("9", 0.0),
            Point::new("11", -10.0),
            Point::new("8", 5.0),
        ]);
        let order = PeriodOrder::new(&["8".into(), "9".into(), "10".into(), "11".into()]);

        let trend = Trend::for_cell(&cell, &order, 3).unwrap();
        // Periods 9, 10, 11 on a -11..110 scale
        assert_eq!(trend.glyphs, "▂▇▁");
        assert!(!trend.positive);
    }

    #[test]
    fn test_single_point_has_no_trend() {
        let cell = Cell::new("Sales", "North").with_points(vec![Point::new("1", 5.0)]);
        assert!(Trend::for_cell(&cell, &PeriodOrder::natural(), 8).is_none());
    }
}
