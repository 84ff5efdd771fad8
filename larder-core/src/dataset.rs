//! Recipe dataset ingestion.
//!
//! The dataset is a CSV export with (at least) the columns `Title`,
//! `Cleaned_Ingredients` and `Instructions`. Rows missing any of the three are
//! dropped, and only the first `max_recipes` valid rows are kept.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

pub const TITLE_COLUMN: &str = "Title";
pub const INGREDIENTS_COLUMN: &str = "Cleaned_Ingredients";
pub const INSTRUCTIONS_COLUMN: &str = "Instructions";

/// Default number of valid rows to index.
pub const DEFAULT_MAX_RECIPES: usize = 50;

/// A recipe as it appears in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
}

/// The part of a recipe stored alongside its embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeMetadata {
    pub title: String,
    pub instructions: String,
}

impl RecipeRecord {
    /// Text that gets embedded for similarity search.
    pub fn index_text(&self) -> String {
        format!("{} - Ingredients: {}", self.title, self.ingredients)
    }

    pub fn metadata(&self) -> RecipeMetadata {
        RecipeMetadata {
            title: self.title.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

/// Recipes loaded from a dataset, plus counts for reporting.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub recipes: Vec<RecipeRecord>,
    /// Rows read before the limit was reached (or the file ended).
    pub rows_read: usize,
    /// Rows skipped because a required field was missing or blank.
    pub rows_dropped: usize,
}

#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Cleaned_Ingredients")]
    ingredients: Option<String>,
    #[serde(rename = "Instructions")]
    instructions: Option<String>,
}

impl DatasetRow {
    fn into_record(self) -> Option<RecipeRecord> {
        let title = non_blank(self.title)?;
        let ingredients = non_blank(self.ingredients)?;
        let instructions = non_blank(self.instructions)?;
        Some(RecipeRecord {
            title,
            ingredients,
            instructions,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Load up to `max_recipes` valid recipes from a CSV file on disk.
pub fn load_recipes(path: &Path, max_recipes: usize) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = read_recipes(file, max_recipes)?;

    tracing::info!(
        path = %path.display(),
        recipes = dataset.recipes.len(),
        rows_read = dataset.rows_read,
        rows_dropped = dataset.rows_dropped,
        "Loaded recipe dataset"
    );

    Ok(dataset)
}

/// Read up to `max_recipes` valid recipes from any CSV source.
pub fn read_recipes<R: Read>(reader: R, max_recipes: usize) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in [TITLE_COLUMN, INGREDIENTS_COLUMN, INSTRUCTIONS_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column.to_string()));
        }
    }

    let mut dataset = Dataset::default();
    if max_recipes == 0 {
        return Ok(dataset);
    }

    for row in csv_reader.deserialize::<DatasetRow>() {
        let row = row?;
        dataset.rows_read += 1;

        match row.into_record() {
            Some(record) => {
                dataset.recipes.push(record);
                if dataset.recipes.len() == max_recipes {
                    break;
                }
            }
            None => dataset.rows_dropped += 1,
        }
    }

    Ok(dataset)
}
