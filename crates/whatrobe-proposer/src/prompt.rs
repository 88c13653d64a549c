//! Prompt rendering for the generative proposer.
//!
//! Uses Handlebars with escaping disabled (the output is a model prompt, not
//! HTML) and two helpers:
//! - join: Join array with separator
//! - default: Fallback text for missing values

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde_json::{json, Value};
use thiserror::Error;
use whatrobe_core::{ClothingItem, Preferences, MAX_OUTFITS, MAX_OUTFIT_ITEMS, MIN_OUTFIT_ITEMS};

/// Tags beyond this count are left out of the item summary.
pub const MAX_PROMPT_TAGS: usize = 5;

const OUTFIT_TEMPLATE_NAME: &str = "outfits";

const OUTFIT_TEMPLATE: &str = r#"You are a personal stylist. Given these clothing items (id: category | colors | style | fit | details):
{{#each items}}
- {{id}}: {{category}} | {{color}}{{#if secondaryColor}}/{{secondaryColor}}{{/if}} | {{style}} | {{fit}}{{#if pattern}} | pattern: {{pattern}}{{/if}}{{#if material}} | material: {{material}}{{/if}}{{#if formality}} | formality: {{formality}}{{/if}}{{#if tags}} | tags: {{join tags ", "}}{{/if}}
{{/each}}

Create {{count}} diverse, non-overlapping outfit combinations for:
- Occasion: {{default occasion "casual"}}
- Style preference: {{default style "comfortable"}}
- Weather: {{default weather "moderate"}}

Rules:
- Each outfit uses between {{min_items}} and {{max_items}} items.
- Use only the exact item ids listed above.
- Never repeat the same set of items in two outfits.
- Consider color coordination, formality and suitability for the weather.

For each outfit provide a catchy name, the item ids, and a short explanation of why it works.

Respond with a JSON array only, no additional text:
[
  {"name": "Outfit name", "itemIds": ["id1", "id2", "id3"], "description": "Why this combination works"}
]"#;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("template registration failed: {0}")]
    Template(String),
    #[error("render failed: {0}")]
    Render(String),
}

/// Compiled prompt renderer with registered helpers.
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl PromptRenderer {
    pub fn new() -> Result<Self, PromptError> {
        Self::with_template(OUTFIT_TEMPLATE)
    }

    /// Use a custom template; it receives the same data as the default one.
    pub fn with_template(template: &str) -> Result<Self, PromptError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("join", Box::new(join_helper));
        handlebars.register_helper("default", Box::new(default_helper));
        handlebars
            .register_template_string(OUTFIT_TEMPLATE_NAME, template)
            .map_err(|e| PromptError::Template(e.to_string()))?;

        Ok(Self { handlebars })
    }

    pub fn render(&self, inventory: &[ClothingItem], preferences: &Preferences) -> Result<String, PromptError> {
        self.handlebars
            .render(OUTFIT_TEMPLATE_NAME, &prompt_data(inventory, preferences))
            .map_err(|e| PromptError::Render(e.to_string()))
    }
}

/// Template data: one compact object per item plus the preference tuple.
pub fn prompt_data(inventory: &[ClothingItem], preferences: &Preferences) -> Value {
    let items: Vec<Value> = inventory
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "category": item.category,
                "color": item.color,
                "secondaryColor": item.secondary_color,
                "style": item.style,
                "fit": item.fit,
                "pattern": item.pattern,
                "material": item.material,
                "formality": item.formality,
                "tags": item.tags.iter().take(MAX_PROMPT_TAGS).collect::<Vec<_>>(),
            })
        })
        .collect();

    json!({
        "items": items,
        "occasion": preferences.occasion,
        "style": preferences.style,
        "weather": preferences.weather,
        "count": MAX_OUTFITS,
        "min_items": MIN_OUTFIT_ITEMS,
        "max_items": MAX_OUTFIT_ITEMS,
    })
}

/// Join an array with a separator
fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h.param(1).and_then(|v| v.value().as_str()).unwrap_or(", ");

    if let Some(arr) = h.param(0).and_then(|v| v.value().as_array()) {
        let strings: Vec<String> = arr
            .iter()
            .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
            .collect();
        out.write(&strings.join(separator))?;
    }

    Ok(())
}

/// Default value helper
fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let default = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

    match h.param(0).map(|v| v.value()) {
        Some(Value::String(s)) if !s.is_empty() => out.write(s)?,
        Some(v) if !v.is_null() && !v.is_string() => out.write(&v.to_string())?,
        _ => out.write(default)?,
    }

    Ok(())
}
