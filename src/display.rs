//! 結果パネルのターミナル表示

use recipe_finder_common::panel::{
    ERROR_TEXT, ERROR_TITLE, NO_RESULTS_HINT, NO_RESULTS_TEXT, NO_RESULTS_TITLE,
    PLACEHOLDER_TEXT, SEARCHING_TEXT,
};
use recipe_finder_common::{format_instructions, Recipe, Recommendation, ResultPanel};

pub const SEPARATOR: &str = "────────────────────────────────────────";

/// 結果パネルを文字列にする
///
/// `resolve_image` は画像参照を表示用のURLに変換する。
pub fn render_panel(panel: &ResultPanel, resolve_image: impl Fn(&str) -> String) -> String {
    match panel {
        ResultPanel::Placeholder => PLACEHOLDER_TEXT.to_string(),
        ResultPanel::Searching => format!("🔍 {}", SEARCHING_TEXT),
        ResultPanel::Failed(message) => {
            format!("❌ {}\n{}\n{}", ERROR_TITLE, ERROR_TEXT, message)
        }
        ResultPanel::Ready(Recommendation::NoMatch { message }) => {
            let mut out = format!("😞 {}\n{}\n{}", NO_RESULTS_TITLE, NO_RESULTS_TEXT, NO_RESULTS_HINT);
            if let Some(message) = message {
                out.push_str(&format!("\n({})", message));
            }
            out
        }
        ResultPanel::Ready(Recommendation::Recipes { recipes, detected }) => {
            let blocks: Vec<String> = recipes
                .iter()
                .map(|r| render_recipe(r, &resolve_image))
                .collect();
            let mut out = blocks.join(&format!("\n{}\n\n", SEPARATOR));
            if !detected.is_empty() {
                out.push_str(&format!(
                    "\n\n🎯 Based on your ingredients: {}",
                    detected.join(", ")
                ));
            }
            out
        }
    }
}

fn render_recipe(recipe: &Recipe, resolve_image: &impl Fn(&str) -> String) -> String {
    let mut out = format!("🍛 {}", recipe.title);
    if let Some(score) = recipe.score {
        out.push_str(&format!("  (matched {} ingredients)", score));
    }
    out.push('\n');

    if let Some(image) = &recipe.image {
        out.push_str(&format!("🖼  {}\n", resolve_image(image)));
    }

    out.push_str("\n📋 Ingredients\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("  • {}\n", ingredient));
    }

    out.push_str("\n👩‍🍳 Instructions\n");
    out.push_str(&format_instructions(recipe.instructions.as_deref()).to_text());
    out.push('\n');
    out
}
