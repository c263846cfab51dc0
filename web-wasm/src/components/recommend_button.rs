//! 推薦ボタン

use leptos::prelude::*;

use crate::app::SessionSignal;

#[component]
pub fn RecommendButton<F>(session: SessionSignal, on_recommend: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="recommend">
            <button
                class="btn btn-primary"
                disabled=move || session.with(|s| !s.trigger().is_enabled())
                on:click=move |_| on_recommend(())
            >
                {move || session.with(|s| s.trigger().label())}
            </button>
        </div>
    }
}
