//! Category values and their canonical order.

use crate::table::{format_number, Cell};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A category value as learned by an encoder.
///
/// Categories sort numbers first (ascending), then text (byte order), then
/// missing. This order fixes both ordinal ranks and indicator column order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Category {
    Number(f64),
    Text(String),
    Missing,
}

impl Category {
    /// Category of a cell. `-0.0` and `0.0` are the same category.
    pub fn from_cell(cell: &Cell) -> Self {
        match cell {
            Cell::Number(v) if v.is_nan() => Category::Missing,
            Cell::Number(v) if *v == 0.0 => Category::Number(0.0),
            Cell::Number(v) => Category::Number(*v),
            Cell::Text(s) => Category::Text(s.clone()),
            Cell::Missing => Category::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Category::Missing)
    }

    /// Label used in indicator column names; missing renders as `nan`.
    pub fn label(&self) -> String {
        match self {
            Category::Number(v) => format_number(*v),
            Category::Text(s) => s.clone(),
            Category::Missing => "nan".to_string(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Category::Number(_) => 0,
            Category::Text(_) => 1,
            Category::Missing => 2,
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Category::Number(a), Category::Number(b)) => a.total_cmp(b),
            (Category::Text(a), Category::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Category {}

/// Sorted distinct categories of a column.
pub(crate) fn distinct_sorted<'a, I>(cells: I, keep_missing: bool) -> Vec<Category>
where
    I: IntoIterator<Item = &'a Cell>,
{
    let mut categories: Vec<Category> = cells
        .into_iter()
        .map(Category::from_cell)
        .filter(|c| keep_missing || !c.is_missing())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}
