use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::de;
use super::{CellKey, PeriodOrder};

/// One period of a cell's time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default, deserialize_with = "de::label")]
    pub period: String,
    #[serde(default, deserialize_with = "de::number_or_zero")]
    pub value: f64,
    /// Budget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ppto: Option<f64>,
    /// Forecast
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<f64>,
}

impl Point {
    pub fn new(period: impl Into<String>, value: f64) -> Self {
        Self {
            period: period.into(),
            value,
            ppto: None,
            prev: None,
        }
    }

    pub fn with_ppto(mut self, ppto: f64) -> Self {
        self.ppto = Some(ppto);
        self
    }

    pub fn with_prev(mut self, prev: f64) -> Self {
        self.prev = Some(prev);
        self
    }
}

/// A category/subcategory intersection (optionally scoped to a project) and
/// its full time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    #[serde(default, deserialize_with = "de::label")]
    pub category: String,
    #[serde(default, deserialize_with = "de::label")]
    pub subcategory: String,
    #[serde(
        default,
        alias = "project",
        deserialize_with = "de::optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "de::nullable")]
    pub time_series: Vec<Point>,
}

/// Budget/forecast comparison for the most recent point of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Comparative {
    /// Forecast as a percentage of budget
    pub forecast_vs_budget_pct: Option<f64>,
    /// Actual as a percentage of forecast
    pub actual_vs_forecast_pct: Option<f64>,
    /// Forecast minus actual
    pub pending: Option<f64>,
}

impl Cell {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
            project_id: None,
            time_series: Vec::new(),
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project_id = Some(project.into());
        self
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.time_series = points;
        self
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(
            self.project_id.as_deref(),
            &self.category,
            &self.subcategory,
        )
    }

    /// Human-readable name used for titles and row labels.
    pub fn display_name(&self) -> String {
        match &self.project_id {
            Some(project) => format!("{} - {} ({})", self.category, self.subcategory, project),
            None => format!("{} - {}", self.category, self.subcategory),
        }
    }

    /// Points ordered by period, oldest first. Used for charts.
    pub fn chronological(&self, order: &PeriodOrder) -> Vec<&Point> {
        let mut points: Vec<&Point> = self.time_series.iter().collect();
        points.sort_by(|a, b| order.compare(&a.period, &b.period));
        points
    }

    /// Points ordered by period, newest first. Used for the detail table.
    pub fn most_recent_first(&self, order: &PeriodOrder) -> Vec<&Point> {
        let mut points = self.chronological(order);
        points.reverse();
        points
    }

    pub fn last_point(&self, order: &PeriodOrder) -> Option<&Point> {
        self.time_series
            .iter()
            .max_by(|a, b| order.compare(&a.period, &b.period))
    }

    pub fn point_at(&self, period: &str) -> Option<&Point> {
        self.time_series.iter().find(|p| p.period == period)
    }

    pub fn has_ppto(&self) -> bool {
        self.time_series.iter().any(|p| p.ppto.is_some())
    }

    pub fn has_prev(&self) -> bool {
        self.time_series.iter().any(|p| p.prev.is_some())
    }

    pub fn comparative(&self, order: &PeriodOrder) -> Option<Comparative> {
        let last = self.last_point(order)?;
        if last.ppto.is_none() && last.prev.is_none() {
            return None;
        }

        let forecast_vs_budget_pct = match (last.prev, last.ppto) {
            (Some(prev), Some(ppto)) if ppto != 0.0 => Some(prev / ppto * 100.0),
            _ => None,
        };
        let actual_vs_forecast_pct = match last.prev {
            Some(prev) if prev != 0.0 => Some(last.value / prev * 100.0),
            _ => None,
        };

        Some(Comparative {
            forecast_vs_budget_pct,
            actual_vs_forecast_pct,
            pending: last.prev.map(|prev| prev - last.value),
        })
    }

    /// Sum several cells period by period.
    ///
    /// Budget and forecast stay absent for a period unless at least one of
    /// the merged points carries them. Returns `None` for an empty input.
    pub fn merged<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Option<Cell> {
        let mut cells = cells.into_iter();
        let first = cells.next()?;

        let mut merged = Cell::new(first.category.clone(), first.subcategory.clone());
        merged.project_id = first.project_id.clone();

        let mut by_period: BTreeMap<String, Point> = BTreeMap::new();
        let mut absorb = |cell: &Cell| {
            for point in &cell.time_series {
                let entry = by_period
                    .entry(point.period.clone())
                    .or_insert_with(|| Point::new(point.period.clone(), 0.0));
                entry.value += point.value;
                if let Some(ppto) = point.ppto {
                    *entry.ppto.get_or_insert(0.0) += ppto;
                }
                if let Some(prev) = point.prev {
                    *entry.prev.get_or_insert(0.0) += prev;
                }
            }
        };

        absorb(first);
        for cell in cells {
            if merged.project_id != cell.project_id {
                merged.project_id = None;
            }
            absorb(cell);
        }

        merged.time_series = by_period.into_values().collect();
        Some(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cell() -> Cell {
        Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q2", 20.0),
            Point::new("2023-Q1", 10.0),
            Point::new("2023-Q3", 30.0),
        ])
    }

    #[test]
    fn test_chronological_and_most_recent_first_are_opposite() {
        let cell = sample_cell();
        let order = PeriodOrder::natural();

        let ascending: Vec<&str> = cell
            .chronological(&order)
            .iter()
            .map(|p| p.period.as_str())
            .collect();
        let descending: Vec<&str> = cell
            .most_recent_first(&order)
            .iter()
            .map(|p| p.period.as_str())
            .collect();

        assert_eq!(ascending, vec!["2023-Q1", "2023-Q2", "2023-Q3"]);
        assert_eq!(descending, vec!["2023-Q3", "2023-Q2", "2023-Q1"]);
        // Source order is left untouched
        assert_eq!(cell.time_series[0].period, "2023-Q2");
    }

    #[test]
    fn test_last_point_uses_period_order() {
        let cell = sample_cell();
        assert_eq!(
            cell.last_point(&PeriodOrder::natural()).map(|p| p.value),
            Some(30.0)
        );
    }

    #[test]
    fn test_numeric_periods_follow_axis_order() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("10", 2.0),
            Point::new("11", 3.0),
            Point::new("9", 1.0),
        ]);
        let order = PeriodOrder::new(&["9".to_string(), "10".to_string(), "11".to_string()]);

        let ascending: Vec<&str> = cell
            .chronological(&order)
            .iter()
            .map(|p| p.period.as_str())
            .collect();
        assert_eq!(ascending, vec!["9", "10", "11"]);
        assert_eq!(cell.most_recent_first(&order)[0].period, "11");
        assert_eq!(cell.last_point(&order).map(|p| p.value), Some(3.0));

        // Without an axis numbers still compare as numbers
        assert_eq!(
            cell.last_point(&PeriodOrder::natural()).map(|p| p.period.as_str()),
            Some("11")
        );
    }

    #[test]
    fn test_comparative_on_last_point() {
        let cell = Cell::new("Sales", "North").with_points(vec![
            Point::new("2023-Q1", 50.0).with_ppto(100.0).with_prev(80.0),
        ]);

        let comparative = cell.comparative(&PeriodOrder::natural()).unwrap();
        assert_eq!(comparative.forecast_vs_budget_pct, Some(80.0));
        assert_eq!(comparative.actual_vs_forecast_pct, Some(62.5));
        assert_eq!(comparative.pending, Some(30.0));
    }

    #[test]
    fn test_comparative_absent_without_reference_values() {
        assert!(sample_cell()
            .comparative(&PeriodOrder::natural())
            .is_none());
    }

    #[test]
    fn test_merged_sums_per_period() {
        let a = Cell::new("Sales", "North")
            .with_project("P1")
            .with_points(vec![
                Point::new("2023-Q1", 10.0).with_ppto(5.0),
                Point::new("2023-Q2", 20.0),
            ]);
        let b = Cell::new("Sales", "North")
            .with_project("P2")
            .with_points(vec![Point::new("2023-Q2", 1.0).with_prev(2.0)]);

        let merged = Cell::merged([&a, &b]).unwrap();

        assert_eq!(merged.project_id, None);
        assert_eq!(merged.time_series.len(), 2);
        assert_eq!(merged.time_series[0].ppto, Some(5.0));
        assert_eq!(merged.time_series[0].prev, None);
        assert_eq!(merged.time_series[1].value, 21.0);
        assert_eq!(merged.time_series[1].ppto, None);
        assert_eq!(merged.time_series[1].prev, Some(2.0));
    }

    #[test]
    fn test_null_reference_values_deserialize_as_absent() {
        let point: Point =
            serde_json::from_str(r#"{"period": 202301, "value": null, "ppto": null}"#).unwrap();
        assert_eq!(point.period, "202301");
        assert_eq!(point.value, 0.0);
        assert_eq!(point.ppto, None);
        assert_eq!(point.prev, None);
    }
}
