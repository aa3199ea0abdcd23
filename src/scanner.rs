//! Event-driven scanner that assembles a [`Recipe`] from one pass over a
//! page.
//!
//! The page is consumed as a stream of tokenizer events in document order;
//! there is no DOM and no backtracking, every decision is made online. The
//! scanner is a small state machine: `possible_items` while inside a script
//! block that may embed payload data, `parsing_step` while inside a step
//! container.

use std::path::PathBuf;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use log::error;

use crate::error::ImportError;
use crate::extractors;
use crate::mappers;
use crate::model::{Recipe, Step};

const SCRIPT_MIME: &str = "text/javascript";
const STEP_CONTAINER_CLASS: &str = "recipe-step-list__container";
const TITLE_FIELD: &str = "title";
const AUTHOR_FIELD: &str = "author";
const ITEMS_MARKER: &str = "ingredientsUtensils";
const META_MARKER: &str = "recipesData";
const CONTENT_INFO_MARKER: &str = "contentInfo";

/// Scan a complete HTML document and return the extracted recipe.
pub fn scan_document(html: &str) -> Result<Recipe, ImportError> {
    RecipeScanner::new().scan(html)
}

pub struct RecipeScanner {
    recipe: Recipe,
    parsing_step: bool,
    possible_items: bool,
    diagnostic_path: PathBuf,
    failure: Option<ImportError>,
}

impl RecipeScanner {
    /// Each scanner owns its own record and state; nothing is shared
    /// between instances.
    pub fn new() -> Self {
        Self::with_diagnostic_path(extractors::DEFAULT_DIAGNOSTIC_PATH)
    }

    pub fn with_diagnostic_path(path: impl Into<PathBuf>) -> Self {
        RecipeScanner {
            recipe: Recipe::default(),
            parsing_step: false,
            possible_items: false,
            diagnostic_path: path.into(),
            failure: None,
        }
    }

    /// Drive the tokenizer over one in-memory document and finish.
    pub fn scan(self, html: &str) -> Result<Recipe, ImportError> {
        let mut input = BufferQueue::default();
        input.push_back(StrTendril::from_slice(html));
        let mut tokenizer = Tokenizer::new(self, TokenizerOpts::default());
        let _ = tokenizer.feed(&mut input);
        tokenizer.end();
        tokenizer.sink.finish()
    }

    /// The populated recipe, or the first extraction failure recorded
    /// during the scan.
    pub fn finish(self) -> Result<Recipe, ImportError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.recipe),
        }
    }

    fn attr<'a>(tag: &'a Tag, name: &str) -> Option<&'a str> {
        tag.attrs
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| &*attr.value)
    }

    fn handle_start_tag(&mut self, tag: &Tag) -> TokenSinkResult<()> {
        if tag.self_closing {
            self.handle_void_tag(tag);
            return TokenSinkResult::Continue;
        }
        if &*tag.name == "script" {
            if Self::attr(tag, "type") == Some(SCRIPT_MIME) {
                self.possible_items = true;
            }
            // script contents must reach handle_text as one raw data stream
            return TokenSinkResult::RawData(RawKind::ScriptData);
        }
        if Self::attr(tag, "class").is_some_and(|class| class.contains(STEP_CONTAINER_CLASS)) {
            self.parsing_step = true;
            let num = self.recipe.steps.len() as u32;
            self.recipe.steps.push(Step {
                num,
                ..Step::default()
            });
        }
        TokenSinkResult::Continue
    }

    fn handle_void_tag(&mut self, tag: &Tag) {
        match Self::attr(tag, "name") {
            Some(TITLE_FIELD) => {
                if let Some(value) = Self::attr(tag, "value") {
                    self.recipe.title = value.to_string();
                }
            }
            Some(AUTHOR_FIELD) => {
                if let Some(content) = Self::attr(tag, "content") {
                    self.recipe.author = content.to_string();
                }
            }
            _ => {}
        }
    }

    fn handle_text(&mut self, data: &str) {
        let data = data.trim();
        if data.is_empty() || self.failure.is_some() {
            return;
        }

        // The marker checks are independent, not mutually exclusive.
        if self.possible_items {
            if data.contains(ITEMS_MARKER) {
                match extractors::extract_payload(data, 1, &self.diagnostic_path) {
                    Ok(payload) => {
                        self.recipe.utensils = payload
                            .get("utensils")
                            .map(mappers::map_utensils)
                            .unwrap_or_default();
                        self.recipe.ingredients = payload
                            .get("ingredientGroups")
                            .map(mappers::map_ingredients)
                            .unwrap_or_default();
                    }
                    Err(err) => self.fail(err),
                }
            }
            if data.contains(META_MARKER) {
                match extractors::extract_meta(data, &self.diagnostic_path) {
                    Ok(payload) => {
                        let meta = mappers::map_recipe_meta(&payload);
                        self.recipe.note = meta.note;
                        self.recipe.people = meta.people;
                    }
                    Err(err) => self.fail(err),
                }
            }
            if data.contains(CONTENT_INFO_MARKER) {
                match extractors::extract_payload(data, 0, &self.diagnostic_path) {
                    Ok(payload) => {
                        let info = mappers::map_content_info(&payload);
                        self.recipe.description = info.kind;
                        self.recipe.difficulty = info.difficulty;
                        self.recipe.cost = info.cost;
                    }
                    Err(err) => self.fail(err),
                }
            }
        }

        if self.parsing_step {
            // parsing_step implies a step was pushed on entry
            if let Some(step) = self.recipe.steps.last_mut() {
                if step.name.is_empty() {
                    step.name = data.to_string();
                } else if step.content.is_empty() {
                    step.content = data.to_string();
                } else {
                    // a third text block ends the step without being consumed
                    self.parsing_step = false;
                }
            }
        }
    }

    fn fail(&mut self, err: ImportError) {
        error!("extraction failed: {err}");
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }
}

impl Default for RecipeScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSink for RecipeScanner {
    type Handle = ();

    fn process_token(&mut self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => return self.handle_start_tag(&tag),
                TagKind::EndTag => {
                    if &*tag.name == "script" {
                        self.possible_items = false;
                    }
                }
            },
            Token::CharacterTokens(data) => self.handle_text(&data),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}
