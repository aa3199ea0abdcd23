//! Extract structured recipe data from Marmiton pages.
//!
//! The page is scanned in one streaming pass: a tokenizer drives the
//! [`scanner::RecipeScanner`], which routes recognized fragments through
//! the script-payload extractors and field mappers into a single
//! [`model::Recipe`]. The record can then be serialized to a TOML document
//! and back.

pub mod config;
pub mod error;
pub mod extractors;
pub mod mappers;
pub mod model;
pub mod scanner;
pub mod serialize;
pub mod session;

use log::debug;

pub use crate::error::ImportError;
pub use crate::model::{Ingredient, IngredientFlags, Recipe, Step, Utensil};
pub use crate::scanner::{scan_document, RecipeScanner};

use crate::session::MarmitonSession;

/// Fetch a recipe page and extract its record.
pub fn fetch_recipe(url: &str) -> Result<Recipe, ImportError> {
    let session = MarmitonSession::new()?;
    let body = session.fetch_url(url)?;
    let recipe = scanner::scan_document(&body)?;
    debug!("{recipe:#?}");
    Ok(recipe)
}

/// Fetch a random recipe from the site.
pub fn random_recipe() -> Result<Recipe, ImportError> {
    let session = MarmitonSession::new()?;
    let body = session.fetch_random()?;
    scanner::scan_document(&body)
}

/// Fetch a recipe and render it as a TOML document.
pub fn import_recipe(url: &str) -> Result<String, ImportError> {
    let recipe = fetch_recipe(url)?;
    serialize::toml::dumps(&recipe)
}
