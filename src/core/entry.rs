use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Relative tolerance used when deriving the x step from entry gaps.
pub const X_STEP_EPSILON: f64 = 1e-4;

/// One immutable data point of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub x: f64,
    pub y: f64,
}

impl Entry {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The dataset of one chart draw: entries grouped into series, with cached
/// extrema and the default x step.
///
/// `id` is the version token: a new id means "dataset changed" without any
/// deep comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryModel {
    id: u64,
    series: Vec<Vec<Entry>>,
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    x_gcd: Option<f64>,
    children: Vec<EntryModel>,
}

impl EntryModel {
    pub fn new(id: u64, series: Vec<Vec<Entry>>) -> ChartResult<Self> {
        for entry in series.iter().flatten() {
            if !entry.x.is_finite() || !entry.y.is_finite() {
                return Err(ChartError::InvalidData(
                    "entry coordinates must be finite".to_owned(),
                ));
            }
        }

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for entry in series.iter().flatten() {
            min_x = min_x.min(entry.x);
            max_x = max_x.max(entry.x);
            min_y = min_y.min(entry.y);
            max_y = max_y.max(entry.y);
        }
        if !min_x.is_finite() {
            (min_x, max_x, min_y, max_y) = (0.0, 0.0, 0.0, 0.0);
        }

        let x_gcd = x_step_of(series.iter().flatten().map(|entry| entry.x));
        Ok(Self {
            id,
            series,
            min_x,
            max_x,
            min_y,
            max_y,
            x_gcd,
            children: Vec::new(),
        })
    }

    /// Convenience constructor for a single-series dataset.
    pub fn single(id: u64, entries: Vec<Entry>) -> ChartResult<Self> {
        Self::new(id, vec![entries])
    }

    /// Builds the dataset of a composed chart. Child `i` feeds chart child `i`.
    pub fn composed(id: u64, children: Vec<EntryModel>) -> ChartResult<Self> {
        if children.is_empty() {
            return Err(ChartError::InvalidData(
                "composed dataset needs at least one child".to_owned(),
            ));
        }
        let series = children
            .iter()
            .flat_map(|child| child.series.iter().cloned())
            .collect();
        let mut model = Self::new(id, series)?;
        model.children = children;
        Ok(model)
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn series(&self) -> &[Vec<Entry>] {
        &self.series
    }

    #[must_use]
    pub fn children(&self) -> &[EntryModel] {
        &self.children
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Greatest common divisor of the gaps between distinct x values.
    /// `None` when fewer than two distinct x values exist.
    #[must_use]
    pub fn x_gcd(&self) -> Option<f64> {
        self.x_gcd
    }

    /// Length of the longest series.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.series.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}

fn x_step_of(xs: impl Iterator<Item = f64>) -> Option<f64> {
    let mut xs: Vec<f64> = xs.collect();
    xs.sort_by(f64::total_cmp);

    let mut gaps = Vec::with_capacity(xs.len());
    for pair in xs.windows(2) {
        let gap = pair[1] - pair[0];
        let scale = pair[1].abs().max(pair[0].abs()).max(1.0);
        if gap > scale * f64::EPSILON * 16.0 {
            gaps.push(gap);
        }
    }

    let smallest = gaps.iter().copied().fold(f64::INFINITY, f64::min);
    if !smallest.is_finite() {
        return None;
    }
    let tolerance = smallest * X_STEP_EPSILON;
    gaps.into_iter().reduce(|a, b| float_gcd(a, b, tolerance))
}

fn float_gcd(a: f64, b: f64, tolerance: f64) -> f64 {
    let (mut a, mut b) = (a.max(b), a.min(b));
    while b > tolerance {
        let mut remainder = a % b;
        if b - remainder <= tolerance {
            remainder = 0.0;
        }
        a = b;
        b = remainder;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryModel};

    fn model(xs: &[f64]) -> EntryModel {
        let entries = xs.iter().map(|&x| Entry::new(x, 1.0)).collect();
        EntryModel::single(1, entries).expect("model")
    }

    #[test]
    fn x_gcd_uses_greatest_common_gap() {
        let gcd = model(&[0.0, 2.0, 6.0, 8.0]).x_gcd().expect("gcd");
        assert!((gcd - 2.0).abs() <= 1e-9);

        let gcd = model(&[0.0, 0.3, 0.4]).x_gcd().expect("gcd");
        assert!((gcd - 0.1).abs() <= 1e-6);
    }

    #[test]
    fn x_gcd_ignores_duplicate_x_values() {
        let gcd = model(&[1.0, 1.0, 4.0]).x_gcd().expect("gcd");
        assert!((gcd - 3.0).abs() <= 1e-9);
    }

    #[test]
    fn single_distinct_x_has_no_step() {
        assert_eq!(model(&[5.0, 5.0]).x_gcd(), None);
        assert_eq!(model(&[]).x_gcd(), None);
    }

    #[test]
    fn non_finite_entries_are_rejected() {
        let err = EntryModel::single(1, vec![Entry::new(f64::NAN, 1.0)]).expect_err("nan");
        assert!(format!("{err}").contains("finite"));
    }

    #[test]
    fn composed_model_unions_child_extrema() {
        let a = EntryModel::single(1, vec![Entry::new(0.0, -2.0), Entry::new(5.0, 1.0)])
            .expect("a");
        let b = EntryModel::single(2, vec![Entry::new(0.0, 3.0), Entry::new(10.0, 4.0)])
            .expect("b");
        let composed = EntryModel::composed(3, vec![a, b]).expect("composed");
        assert_eq!(composed.min_x(), 0.0);
        assert_eq!(composed.max_x(), 10.0);
        assert_eq!(composed.min_y(), -2.0);
        assert_eq!(composed.max_y(), 4.0);
        assert_eq!(composed.children().len(), 2);
        assert_eq!(composed.series().len(), 2);
    }
}
