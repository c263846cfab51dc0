//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Recipe Finder"</h1>
            <p class="text-muted">"Upload photos of your ingredients and get a recipe"</p>
        </header>
    }
}
