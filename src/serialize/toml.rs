//! TOML rendering of a [`Recipe`] under a single `[recipe]` table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Deserializer, Serializer};
use crate::error::ImportError;
use crate::model::{Ingredient, IngredientFlags, Recipe, Step, Utensil};

pub struct TomlSerializer;

pub fn dumps(recipe: &Recipe) -> Result<String, ImportError> {
    TomlSerializer.dumps(recipe)
}

pub fn dump(path: &Path, recipe: &Recipe) -> Result<(), ImportError> {
    TomlSerializer.dump(path, recipe)
}

pub fn loads(input: &str) -> Result<Recipe, ImportError> {
    TomlSerializer.loads(input)
}

pub fn load(path: &Path) -> Result<Recipe, ImportError> {
    TomlSerializer.load(path)
}

impl Serializer for TomlSerializer {
    fn dumps(&self, recipe: &Recipe) -> Result<String, ImportError> {
        let doc = RecipeDoc {
            recipe: RecipeTable::from(recipe),
        };
        Ok(::toml::to_string_pretty(&doc)?)
    }
}

impl Deserializer for TomlSerializer {
    fn loads(&self, input: &str) -> Result<Recipe, ImportError> {
        let doc: RecipeDoc = ::toml::from_str(input)?;
        Ok(doc.recipe.into())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecipeDoc {
    #[serde(default)]
    recipe: RecipeTable,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RecipeTable {
    #[serde(skip_serializing_if = "String::is_empty")]
    title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    author: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    difficulty: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    cost: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    time: String,
    #[serde(skip_serializing_if = "is_zero")]
    people: u32,
    #[serde(skip_serializing_if = "is_zero")]
    note: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    utensils: Vec<UtensilRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ingredients: Vec<IngredientRow>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<StepRow>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct UtensilRow {
    name: String,
    quantity: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct IngredientRow {
    name: String,
    quantity: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    unit: String,
    /// Flags travel as lowercase property names, not as the raw bitmask.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flags: Vec<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct StepRow {
    num: u32,
    name: String,
    content: String,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Capitalize the first letter of every word, lowercase the rest.
fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                output.extend(ch.to_uppercase());
            } else {
                output.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            output.push(ch);
            at_word_start = true;
        }
    }
    output
}

impl From<&Recipe> for RecipeTable {
    fn from(recipe: &Recipe) -> Self {
        RecipeTable {
            title: recipe.title.clone(),
            author: recipe.author.clone(),
            description: recipe.description.clone(),
            difficulty: recipe.difficulty.clone(),
            cost: recipe.cost.clone(),
            time: recipe.time.clone(),
            people: recipe.people,
            note: recipe.note,
            utensils: recipe
                .utensils
                .iter()
                .map(|utensil| UtensilRow {
                    name: utensil.name.clone(),
                    quantity: utensil.quantity.clone(),
                })
                .collect(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| IngredientRow {
                    name: title_case(&ingredient.name),
                    quantity: ingredient.quantity.clone(),
                    unit: ingredient.unit.clone(),
                    flags: ingredient
                        .flags
                        .to_names()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                })
                .collect(),
            steps: recipe
                .steps
                .iter()
                .map(|step| StepRow {
                    num: step.num,
                    name: step.name.clone(),
                    content: step.content.clone(),
                })
                .collect(),
        }
    }
}

impl From<RecipeTable> for Recipe {
    fn from(table: RecipeTable) -> Self {
        Recipe {
            title: table.title,
            author: table.author,
            description: table.description,
            difficulty: table.difficulty,
            cost: table.cost,
            time: table.time,
            people: table.people,
            note: table.note,
            utensils: table
                .utensils
                .into_iter()
                .map(|row| Utensil {
                    name: row.name,
                    quantity: row.quantity,
                })
                .collect(),
            ingredients: table
                .ingredients
                .into_iter()
                .map(|row| Ingredient {
                    name: row.name,
                    quantity: row.quantity,
                    unit: row.unit,
                    flags: IngredientFlags::from_names(row.flags),
                })
                .collect(),
            steps: table
                .steps
                .into_iter()
                .map(|row| Step {
                    num: row.num,
                    name: row.name,
                    content: row.content,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe {
            title: "Salade de homard".to_string(),
            author: "Jane Doe".to_string(),
            difficulty: "facile".to_string(),
            people: 4,
            note: 5,
            steps: vec![Step {
                num: 0,
                name: "Préparation".to_string(),
                content: "Couper le homard".to_string(),
            }],
            ingredients: vec![Ingredient {
                name: "homard entier".to_string(),
                quantity: "1".to_string(),
                unit: String::new(),
                flags: IngredientFlags(IngredientFlags::FISH),
            }],
            utensils: vec![Utensil {
                name: "couteau".to_string(),
                quantity: "1".to_string(),
            }],
            ..Recipe::default()
        }
    }

    #[test]
    fn test_dumps_omits_empty_fields() {
        let output = dumps(&sample_recipe()).unwrap();
        assert!(output.contains("title = \"Salade de homard\""));
        // empty description/cost/time and the empty unit are absent
        assert!(!output.contains("description"));
        assert!(!output.contains("cost"));
        assert!(!output.contains("time"));
        assert!(!output.contains("unit"));
    }

    #[test]
    fn test_dumps_title_cases_ingredients_and_lists_flags() {
        let output = dumps(&sample_recipe()).unwrap();
        assert!(output.contains("Homard Entier"));
        assert!(output.contains("\"fish\""));
    }

    #[test]
    fn test_round_trip() {
        let recipe = sample_recipe();
        let restored = loads(&dumps(&recipe).unwrap()).unwrap();
        assert_eq!(restored.title, recipe.title);
        assert_eq!(restored.author, recipe.author);
        assert_eq!(restored.people, 4);
        assert_eq!(restored.note, 5);
        assert_eq!(restored.steps, recipe.steps);
        assert_eq!(restored.utensils, recipe.utensils);
        assert_eq!(restored.ingredients[0].flags, recipe.ingredients[0].flags);
        // ingredient names come back title-cased
        assert_eq!(restored.ingredients[0].name, "Homard Entier");
    }

    #[test]
    fn test_loads_defaults_missing_fields() {
        let recipe = loads("[recipe]\ntitle = \"Crêpes\"\n").unwrap();
        assert_eq!(recipe.title, "Crêpes");
        assert_eq!(recipe.people, 0);
        assert!(recipe.steps.is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("crème fraîche"), "Crème Fraîche");
        assert_eq!(title_case("œuf dur"), "Œuf Dur");
        assert_eq!(title_case("SUCRE"), "Sucre");
    }
}
