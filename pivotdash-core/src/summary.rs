use std::collections::HashMap;

use crate::matrix::ProjectFilter;
use crate::model::DataModel;

/// Magnitude totals per category and per subcategory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub categories: Vec<SummaryLine>,
    pub subcategories: Vec<SummaryLine>,
    pub cells: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub label: String,
    pub total: f64,
    /// Number of cells contributing to the total
    pub cells: usize,
}

impl Summary {
    pub fn grand_total(&self) -> f64 {
        self.categories.iter().map(|l| l.total).sum()
    }
}

/// Sum the absolute last value of each cell, grouped by category and by
/// subcategory. Lines keep the model's axis order; axes with no cells are
/// left out.
pub fn summarize(model: &DataModel, project: &ProjectFilter) -> Summary {
    let mut by_category: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut by_subcategory: HashMap<&str, (f64, usize)> = HashMap::new();
    let mut cells = 0;

    for (_, cell) in model.cells() {
        if let ProjectFilter::Project(p) = project
            && cell.project_id.as_deref() != Some(p.as_str())
        {
            continue;
        }
        let Some(last) = cell.last_point(model.period_order()) else {
            continue;
        };

        let magnitude = last.value.abs();
        cells += 1;

        let entry = by_category.entry(cell.category.as_str()).or_default();
        entry.0 += magnitude;
        entry.1 += 1;

        let entry = by_subcategory.entry(cell.subcategory.as_str()).or_default();
        entry.0 += magnitude;
        entry.1 += 1;
    }

    Summary {
        categories: lines(model.categories(), &by_category),
        subcategories: lines(model.subcategories(), &by_subcategory),
        cells,
    }
}

fn lines(axis: &[String], totals: &HashMap<&str, (f64, usize)>) -> Vec<SummaryLine> {
    axis.iter()
        .filter_map(|label| {
            totals.get(label.as_str()).map(|(total, cells)| SummaryLine {
                label: label.clone(),
                total: *total,
                cells: *cells,
            })
        })
        .collect()
}
