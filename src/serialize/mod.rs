//! Human-editable text serialization of extracted recipes.
//!
//! Absence means default: empty or zero-valued fields are omitted on write
//! and restored to their defaults on read.

use std::fs;
use std::path::Path;

use crate::error::ImportError;
use crate::model::Recipe;

pub mod toml;

pub trait Serializer {
    fn dumps(&self, recipe: &Recipe) -> Result<String, ImportError>;

    fn dump(&self, path: &Path, recipe: &Recipe) -> Result<(), ImportError> {
        fs::write(path, self.dumps(recipe)?)?;
        Ok(())
    }
}

pub trait Deserializer {
    fn loads(&self, input: &str) -> Result<Recipe, ImportError>;

    fn load(&self, path: &Path) -> Result<Recipe, ImportError> {
        self.loads(&fs::read_to_string(path)?)
    }
}
