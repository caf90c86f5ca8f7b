use indexmap::IndexMap;
use tracing::debug;

use crate::core::{DataPoint, Palette};
use crate::error::ChartResult;
use crate::render::Color;

/// One labeled line. Points stay in arrival order and are never re-sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    color: Color,
    points: Vec<DataPoint>,
}

impl Series {
    #[must_use]
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn last_point(&self) -> Option<DataPoint> {
        self.points.last().copied()
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }
}

/// Label-keyed series set. Iteration follows creation order.
#[derive(Debug, Clone, Default)]
pub struct SeriesCollection {
    entries: IndexMap<String, Series>,
}

impl SeriesCollection {
    /// Returns the series for `label`, creating it with the next palette color if absent.
    ///
    /// Nothing is inserted when the palette refuses to hand out a color.
    pub fn find_or_create(&mut self, label: &str, palette: &mut Palette) -> ChartResult<&mut Series> {
        if let Some(index) = self.entries.get_index_of(label) {
            return Ok(&mut self.entries[index]);
        }

        let color = palette.allocate(label)?;
        let (index, _) = self
            .entries
            .insert_full(label.to_owned(), Series::new(label, color));
        debug!(label, index, "created series");
        Ok(&mut self.entries[index])
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&Series> {
        self.entries.get(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.entries.values()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Total number of stored points across every series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.entries.values().map(|series| series.points.len()).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.entries.shrink_to_fit();
    }
}
