//! 肉フィルターのチップ

use leptos::prelude::*;
use recipe_finder_common::KeyCommand;
use web_sys::KeyboardEvent;

use crate::app::SessionSignal;

#[component]
pub fn MeatChips<F>(session: SessionSignal, on_toggle: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone,
{
    // ラベルは起動後に変わらない
    let labels: Vec<String> = session.with_untracked(|s| {
        s.meat().chips().iter().map(|chip| chip.label.clone()).collect()
    });

    view! {
        <section class="meat-options">
            <h2>"Meat preference"</h2>
            <div class="chips" role="group">
                {labels
                    .into_iter()
                    .map(|label| {
                        let selected = {
                            let label = label.clone();
                            move || session.with(|s| s.meat().is_selected(&label))
                        };
                        let on_click = {
                            let on_toggle = on_toggle.clone();
                            let label = label.clone();
                            move |_| on_toggle(label.clone())
                        };
                        let on_keydown = {
                            let on_toggle = on_toggle.clone();
                            let label = label.clone();
                            move |ev: KeyboardEvent| {
                                if KeyCommand::from_chip_key(&ev.key()) == Some(KeyCommand::Activate) {
                                    ev.prevent_default();
                                    on_toggle(label.clone());
                                }
                            }
                        };
                        view! {
                            <span
                                class="meat-chip"
                                class:selected=selected.clone()
                                role="button"
                                tabindex="0"
                                aria-pressed=move || if selected() { "true" } else { "false" }
                                on:click=on_click
                                on:keydown=on_keydown
                            >
                                {label}
                            </span>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
