//! 推薦結果パネル

use leptos::prelude::*;
use recipe_finder_common::panel::{
    ERROR_TEXT, ERROR_TITLE, NO_RESULTS_HINT, NO_RESULTS_TEXT, NO_RESULTS_TITLE,
    PLACEHOLDER_TEXT, SEARCHING_TEXT, SEARCHING_TITLE,
};
use recipe_finder_common::{format_instructions, Recipe, Recommendation, ResultPanel};

use crate::app::SessionSignal;

#[component]
pub fn RecommendationPanel(session: SessionSignal) -> impl IntoView {
    let panel = move || session.with(|s| s.panel().clone());

    view! {
        <section class="recommendation" aria-live="polite">
            {move || render_panel(panel())}
        </section>
    }
}

fn render_panel(panel: ResultPanel) -> AnyView {
    match panel {
        ResultPanel::Placeholder => view! {
            <p class="placeholder">{PLACEHOLDER_TEXT}</p>
        }
        .into_any(),
        ResultPanel::Searching => view! {
            <div class="loading">
                <div class="spinner"></div>
                <h3>{SEARCHING_TITLE}</h3>
                <p>{SEARCHING_TEXT}</p>
            </div>
        }
        .into_any(),
        ResultPanel::Failed(message) => view! {
            <div class="error">
                <h3>{ERROR_TITLE}</h3>
                <p>{ERROR_TEXT}</p>
                <p><small class="error-message">{message}</small></p>
            </div>
        }
        .into_any(),
        ResultPanel::Ready(Recommendation::NoMatch { message }) => view! {
            <div class="no-results">
                <h3>{NO_RESULTS_TITLE}</h3>
                <p>{NO_RESULTS_TEXT}</p>
                <p class="text-muted">{NO_RESULTS_HINT}</p>
                {message.map(|m| view! { <p class="server-message">{m}</p> })}
            </div>
        }
        .into_any(),
        ResultPanel::Ready(Recommendation::Recipes { recipes, detected }) => {
            let last = recipes.len().saturating_sub(1);
            let cards = recipes
                .into_iter()
                .enumerate()
                .map(|(i, recipe)| {
                    view! {
                        <RecipeCard recipe=recipe />
                        {(i < last).then(|| view! { <hr class="recipe-separator" /> })}
                    }
                })
                .collect_view();
            let based_on = (!detected.is_empty()).then(|| {
                view! {
                    <p class="based-on">
                        <strong>"🎯 Based on your ingredients: "</strong>
                        {detected.join(", ")}
                    </p>
                }
            });
            view! {
                <div class="recipes">
                    {cards}
                    {based_on}
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn RecipeCard(recipe: Recipe) -> impl IntoView {
    let paragraphs = format_instructions(recipe.instructions.as_deref()).paragraphs();
    let score = recipe
        .score
        .map(|score| view! { <span class="score">{format!("matched {} ingredients", score)}</span> });
    let image = recipe.image.map(|src| {
        let alt = recipe.title.clone();
        view! { <img class="recipe-image" src=src alt=alt /> }
    });

    view! {
        <article class="recipe-card">
            <h3>{recipe.title}</h3>
            {score}
            {image}
            <h4>"Ingredients"</h4>
            <ul>
                {recipe
                    .ingredients
                    .into_iter()
                    .map(|ingredient| view! { <li>{ingredient}</li> })
                    .collect_view()}
            </ul>
            <h4>"Instructions"</h4>
            <div class="instructions">
                {paragraphs
                    .into_iter()
                    .map(|p| view! { <p>{p}</p> })
                    .collect_view()}
            </div>
        </article>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// パネルを一時的なdivに描画してテキストを返す
    fn rendered_text(panel: ResultPanel) -> String {
        let document = web_sys::window().unwrap().document().unwrap();
        let host: web_sys::HtmlElement = document
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        let handle = leptos::mount::mount_to(host.clone(), move || render_panel(panel));
        let text = host.text_content().unwrap_or_default();
        drop(handle);
        host.remove();
        text
    }

    #[wasm_bindgen_test]
    fn wasm_failed_panel_shows_message() {
        let text = rendered_text(ResultPanel::Failed(
            "Network response was not ok (502): bad gateway".into(),
        ));
        assert!(text.contains(ERROR_TITLE));
        assert!(text.contains(ERROR_TEXT));
        assert!(text.contains("Network response was not ok (502): bad gateway"));
    }

    #[wasm_bindgen_test]
    fn wasm_no_match_is_not_error() {
        let text = rendered_text(ResultPanel::Ready(Recommendation::NoMatch { message: None }));
        assert!(text.contains(NO_RESULTS_TITLE));
        assert!(!text.contains(ERROR_TEXT));
    }

    #[wasm_bindgen_test]
    fn wasm_recipe_instructions_split_into_paragraphs() {
        let recipe = Recipe {
            title: "Rice".into(),
            ingredients: vec!["rice".into()],
            instructions: Some("1. Boil water. 2. Add rice.".into()),
            image: None,
            score: None,
        };
        let text = rendered_text(ResultPanel::Ready(Recommendation::Recipes {
            recipes: vec![recipe],
            detected: vec!["rice".into()],
        }));
        assert!(text.contains("1. Boil water."));
        assert!(text.contains("2. Add rice."));
        assert!(text.contains("Based on your ingredients: rice"));
    }
}
