use std::env;
use std::fs;
use std::path::Path;

use log::debug;

use marmiton_import::config::Settings;
use marmiton_import::serialize::toml::dumps;
use marmiton_import::session::MarmitonSession;
use marmiton_import::{Recipe, RecipeScanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut pretty = false;
    let mut target: Option<&str> = None;
    for arg in &args[1..] {
        match arg.as_str() {
            "--pretty" => pretty = true,
            "--random" => target = None,
            other => target = Some(other),
        }
    }

    let settings = Settings::load()?;
    // The scanner is agnostic to the source: URL, local file, or a random
    // recipe when no target is given.
    let body = match target {
        None => MarmitonSession::from_settings(&settings)?.fetch_random()?,
        Some(path) if Path::new(path).is_file() => fs::read_to_string(path)?,
        Some(url) => MarmitonSession::from_settings(&settings)?.fetch_url(url)?,
    };

    let recipe = RecipeScanner::with_diagnostic_path(&settings.diagnostic_path).scan(&body)?;
    debug!("{recipe:#?}");

    if pretty {
        print_listing(&recipe);
    } else {
        println!("{}", dumps(&recipe)?);
    }

    Ok(())
}

fn print_listing(recipe: &Recipe) {
    println!("{} ({}/5)", recipe.title.to_uppercase(), recipe.note);
    println!("by {}", recipe.author);
    println!("for {} people\n", recipe.people);

    println!("--- UTENSILS");
    for utensil in &recipe.utensils {
        println!("{} ({})", utensil.name, utensil.quantity);
    }

    println!("--- INGREDIENTS");
    for ingredient in &recipe.ingredients {
        println!("{} ({}{})", ingredient.name, ingredient.quantity, ingredient.unit);
    }

    println!();
    for step in &recipe.steps {
        println!("({}) {}\n{}\n", step.num, step.name, step.content);
    }
}
