mod csv;
mod json;

pub use self::csv::CsvSink;
pub use self::json::JsonSink;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::extractors::CANONICAL_NUTRIENTS;
use crate::model::Dataset;
use std::collections::BTreeSet;

/// Written in place of a nutrient the recipe page did not list.
pub const MISSING_VALUE: &str = "-";

/// Receives a finished dataset.
pub trait DatasetSink {
    fn write(&self, dataset: &Dataset) -> Result<()>;
}

/// Sink for the configured output format.
pub fn sink_for(output: &OutputConfig) -> Box<dyn DatasetSink> {
    match output.format {
        OutputFormat::Csv => Box::new(CsvSink::new(&output.path)),
        OutputFormat::Json => Box::new(JsonSink::new(&output.path)),
    }
}

/// A dataset flattened to strings, one 0/1 column per ingredient.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One-hot encode the ingredient sets.
///
/// Columns are `Recipe Title`, `Rating`, every canonical nutrient, then every
/// ingredient seen in any row, sorted. Ingredient names are trimmed, so
/// `"salt "` and `"salt"` share a column.
pub fn encode(dataset: &Dataset) -> EncodedTable {
    let classes: BTreeSet<&str> = dataset
        .rows
        .iter()
        .flat_map(|row| row.ingredients.iter().map(|i| i.trim()))
        .filter(|i| !i.is_empty())
        .collect();

    let mut headers = vec!["Recipe Title".to_string(), "Rating".to_string()];
    headers.extend(CANONICAL_NUTRIENTS.iter().map(|n| n.to_string()));
    headers.extend(classes.iter().map(|c| c.to_string()));

    let rows = dataset
        .rows
        .iter()
        .map(|row| {
            let present: BTreeSet<&str> = row.ingredients.iter().map(|i| i.trim()).collect();

            let mut cells = vec![row.title.clone(), row.rating.to_string()];
            cells.extend(CANONICAL_NUTRIENTS.iter().map(|nutrient| {
                row.nutrition
                    .get(*nutrient)
                    .cloned()
                    .unwrap_or_else(|| MISSING_VALUE.to_string())
            }));
            cells.extend(
                classes
                    .iter()
                    .map(|class| if present.contains(class) { "1" } else { "0" }.to_string()),
            );
            cells
        })
        .collect();

    EncodedTable { headers, rows }
}
