//! アップロードエリアコンポーネント
//!
//! ファイル選択、プレビュー、検出食材の表示。

use leptos::html;
use leptos::prelude::*;
use recipe_finder_common::DetectionStatus;
use web_sys::{File, HtmlInputElement};

use crate::app::{Preview, SessionSignal};

/// 画像未選択時のプレビュー欄
pub const NO_IMAGE_TEXT: &str = "No image selected";

/// 検出状態ごとのCSSクラス
fn status_class(status: &DetectionStatus) -> &'static str {
    match status {
        DetectionStatus::Idle => "detected idle",
        DetectionStatus::Detecting => "detected detecting",
        DetectionStatus::Detected(_) => "detected found",
        DetectionStatus::Empty => "detected empty",
        DetectionStatus::Error(_) => "detected error",
    }
}

fn selected_files(input: &HtmlInputElement) -> Vec<File> {
    let Some(files) = input.files() else {
        return Vec::new();
    };
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

#[component]
pub fn UploadArea<F>(
    session: SessionSignal,
    previews: RwSignal<Vec<Preview>>,
    file_input: NodeRef<html::Input>,
    on_files_chosen: F,
) -> impl IntoView
where
    F: Fn(Vec<File>) + 'static + Clone,
{
    let on_change = move |_| {
        if let Some(input) = file_input.get_untracked() {
            on_files_chosen(selected_files(&input));
        }
    };

    view! {
        <section class="upload-area">
            <label class="upload-label" for="image-input">
                <div class="upload-icon">"📷"</div>
                <p>"Choose photos of your ingredients"</p>
                <p class="text-muted">"JPEG, PNG, WebP"</p>
            </label>
            <input
                id="image-input"
                type="file"
                accept="image/*"
                multiple=true
                node_ref=file_input
                on:change=on_change
            />

            <div class="image-previews">
                <Show
                    when=move || previews.with(|p| !p.is_empty())
                    fallback=|| view! { <p class="text-muted">{NO_IMAGE_TEXT}</p> }
                >
                    <For
                        each=move || previews.get()
                        key=|preview| preview.object_url.clone()
                        children=move |preview| {
                            view! {
                                <img
                                    class="preview-image"
                                    src=preview.object_url
                                    alt=preview.file_name
                                />
                            }
                        }
                    />
                </Show>
            </div>

            <p class=move || session.with(|s| status_class(s.detection()))>
                <span class="detected-label">"Detected ingredients: "</span>
                {move || session.with(|s| s.detection().display_text())}
            </p>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(&DetectionStatus::Idle), "detected idle");
        assert_eq!(
            status_class(&DetectionStatus::Detected(vec!["egg".into()])),
            "detected found"
        );
        assert_eq!(status_class(&DetectionStatus::Error("x".into())), "detected error");
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use recipe_finder_common::Session;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_empty_selection_shows_fallback() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host: web_sys::HtmlElement = document
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        let session: SessionSignal = RwSignal::new_local(Session::default());
        let previews = RwSignal::new(Vec::<Preview>::new());
        let file_input = NodeRef::<html::Input>::new();
        let handle = leptos::mount::mount_to(host.clone(), move || {
            view! {
                <UploadArea
                    session=session
                    previews=previews
                    file_input=file_input
                    on_files_chosen=|_: Vec<File>| {}
                />
            }
        });

        let text = host.text_content().unwrap_or_default();
        assert!(text.contains(NO_IMAGE_TEXT));
        assert!(text.contains(&DetectionStatus::Idle.display_text()));
        drop(handle);
        host.remove();
    }
}
