mod cell;
mod de;
mod key;
mod period;

pub use cell::{Cell, Comparative, Point};
pub use key::CellKey;
pub use period::{natural_cmp, PeriodOrder};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::Result;

/// Raw dashboard payload as produced by the data pipeline.
///
/// Every field is optional on the wire; missing or `null` values fall back to
/// empty collections and `false` flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payload {
    #[serde(deserialize_with = "de::labels")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "de::labels")]
    pub subcategories: Vec<String>,
    #[serde(deserialize_with = "de::labels")]
    pub periods: Vec<String>,
    #[serde(deserialize_with = "de::labels")]
    pub projects: Vec<String>,
    #[serde(deserialize_with = "de::nullable")]
    pub has_projects: bool,
    #[serde(deserialize_with = "de::nullable")]
    pub has_ppto: bool,
    #[serde(deserialize_with = "de::nullable")]
    pub has_prev: bool,
    #[serde(deserialize_with = "de::nullable")]
    pub cell_data: BTreeMap<String, Cell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl Payload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Immutable, validated view of a payload.
#[derive(Debug, Clone, Default)]
pub struct DataModel {
    categories: Vec<String>,
    subcategories: Vec<String>,
    periods: Vec<String>,
    projects: Vec<String>,
    has_projects: bool,
    has_ppto: bool,
    has_prev: bool,
    period_order: PeriodOrder,
    cells: BTreeMap<CellKey, Cell>,
    generated_at: Option<String>,
}

impl DataModel {
    pub fn from_json(json: &str) -> Result<Self> {
        Payload::from_json(json).map(Self::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let payload = Payload::from_reader(std::io::BufReader::new(file))?;
        Ok(Self::from(payload))
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[String] {
        &self.subcategories
    }

    /// Periods in payload order, oldest first
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    pub fn period_order(&self) -> &PeriodOrder {
        &self.period_order
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn has_projects(&self) -> bool {
        self.has_projects
    }

    pub fn has_ppto(&self) -> bool {
        self.has_ppto
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.generated_at.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells.get(key)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&CellKey, &Cell)> {
        self.cells.iter()
    }

    /// Period preselected when the dashboard opens: the most recent one.
    pub fn default_period(&self) -> Option<&str> {
        self.periods.last().map(String::as_str)
    }

    /// Resolve drill-down keys to a single cell.
    ///
    /// One key yields that cell; several keys yield their period-wise sum.
    /// Unknown keys are skipped, and `None` means nothing was found.
    pub fn resolve(&self, keys: &[CellKey]) -> Option<Cell> {
        let found: Vec<&Cell> = keys.iter().filter_map(|k| self.cells.get(k)).collect();
        match found.as_slice() {
            [] => None,
            [single] => Some((*single).clone()),
            many => Cell::merged(many.iter().copied()),
        }
    }
}

impl From<Payload> for DataModel {
    fn from(payload: Payload) -> Self {
        let cells: BTreeMap<CellKey, Cell> = payload
            .cell_data
            .into_iter()
            .map(|(key, cell)| (CellKey::from(key), cell))
            .collect();

        let categories = complete_axis(
            payload.categories,
            cells.values().map(|c| c.category.clone()),
            "category",
        );
        let subcategories = complete_axis(
            payload.subcategories,
            cells.values().map(|c| c.subcategory.clone()),
            "subcategory",
        );
        let projects = complete_axis(
            payload.projects,
            cells.values().filter_map(|c| c.project_id.clone()),
            "project",
        );

        let periods = complete_axis(
            payload.periods,
            cells
                .values()
                .flat_map(|c| c.time_series.iter().map(|p| p.period.clone())),
            "period",
        );
        let period_order = PeriodOrder::new(&periods);

        let has_projects = payload.has_projects && !projects.is_empty();

        tracing::debug!(
            "Built data model: {} cells, {} categories, {} subcategories, {} periods, {} projects",
            cells.len(),
            categories.len(),
            subcategories.len(),
            periods.len(),
            projects.len()
        );

        Self {
            categories,
            subcategories,
            periods,
            period_order,
            projects,
            has_projects,
            has_ppto: payload.has_ppto,
            has_prev: payload.has_prev,
            cells,
            generated_at: payload.generated_at,
        }
    }
}

/// Deduplicate a declared axis and append labels only seen in cell data.
fn complete_axis(
    declared: Vec<String>,
    observed: impl Iterator<Item = String>,
    axis: &str,
) -> Vec<String> {
    let mut labels: Vec<String> = declared.into_iter().unique().collect();
    let known: HashSet<String> = labels.iter().cloned().collect();

    let missing: Vec<String> = observed
        .filter(|label| !known.contains(label))
        .unique()
        .sorted_by(|a, b| natural_cmp(a, b))
        .collect();

    if !missing.is_empty() {
        tracing::warn!(
            "{} {} label(s) found in cell data but not declared in payload",
            missing.len(),
            axis
        );
        labels.extend(missing);
    }

    labels
}
