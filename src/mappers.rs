//! Pure transforms from parsed payload objects into typed record entries.
//!
//! Missing optional fields are never an error here; every mapper falls back
//! to a documented default. Structural mismatches (an expected array slot
//! that is not there) yield empty results.

use html_escape::decode_html_entities;
use serde_json::Value;

use crate::model::{Ingredient, IngredientFlags, Utensil};

/// Placeholder for utensils the payload names incompletely.
const UNKNOWN_UTENSIL: &str = "unknown";

/// Boolean source fields mapped one-to-one, in order, onto the flag bits.
const FLAG_FIELDS: [(&str, u8); 6] = [
    ("is_gluten", IngredientFlags::GLUTEN),
    ("is_pork", IngredientFlags::PORK),
    ("is_vegan", IngredientFlags::VEGAN),
    ("is_vegetarian", IngredientFlags::VEGETARIAN),
    ("is_fish", IngredientFlags::FISH),
    ("is_nuts", IngredientFlags::NUTS),
];

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Quantities are preserved as given; numbers are rendered, not normalized.
fn quantity_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

pub fn map_utensils(data: &Value) -> Vec<Utensil> {
    let Some(items) = data.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| Utensil {
            name: item
                .get("utensil_name")
                .and_then(Value::as_str)
                .map(decode_html_symbols)
                .unwrap_or_else(|| UNKNOWN_UTENSIL.to_string()),
            quantity: quantity_or(item.get("quantity"), "0"),
        })
        .collect()
}

/// Map the ingredient groups payload. Only the first group's item list is
/// consulted; recipes with several groups lose the rest.
pub fn map_ingredients(data: &Value) -> Vec<Ingredient> {
    let Some(items) = data
        .get(0)
        .and_then(|group| group.get("ingredient_group_items"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| {
            let ingredient = item.get("ingredient");
            let mut flags = IngredientFlags::default();
            if let Some(ingredient) = ingredient {
                for (field, bit) in FLAG_FIELDS {
                    if ingredient
                        .get(field)
                        .and_then(Value::as_bool)
                        .unwrap_or(false)
                    {
                        flags.insert(bit);
                    }
                }
            }
            Ingredient {
                name: ingredient
                    .and_then(|i| i.get("name"))
                    .and_then(Value::as_str)
                    .map(decode_html_symbols)
                    .unwrap_or_default(),
                quantity: quantity_or(item.get("quantity"), "1"),
                unit: item
                    .get("unit")
                    .and_then(|u| u.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                flags,
            }
        })
        .collect()
}

/// Rating and serving count read off the first recipe of the metadata block.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RecipeMeta {
    pub note: u32,
    pub people: u32,
}

pub fn map_recipe_meta(data: &Value) -> RecipeMeta {
    let first = data.get("recipes").and_then(|recipes| recipes.get(0));
    RecipeMeta {
        note: first
            .and_then(|r| r.get("note"))
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
        people: first
            .and_then(|r| r.get("people"))
            .and_then(Value::as_u64)
            .unwrap_or(0) as u32,
    }
}

/// The three optional strings of the content-info block. The page's `type`
/// field is the closest thing it has to a description.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ContentInfo {
    pub kind: String,
    pub difficulty: String,
    pub cost: String,
}

pub fn map_content_info(data: &Value) -> ContentInfo {
    let field = |key: &str| {
        data.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    ContentInfo {
        kind: field("type"),
        difficulty: field("difficulty"),
        cost: field("cost"),
    }
}
