//! メインアプリケーションコンポーネント

use gloo::console;
use gloo::dialogs;
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use recipe_finder_common::{Error, KeyCommand, MeatSelection, RecipeBackend, Session};
use web_sys::{File, Url};

use crate::api::WebBackend;
use crate::components::{
    header::Header,
    meat_chips::MeatChips,
    recommend_button::RecommendButton,
    recommendation_panel::RecommendationPanel,
    upload_area::UploadArea,
};

/// ブラウザ上のセッション（Fileは!Sendなのでローカル保持）
pub type SessionSignal = RwSignal<Session<File>, LocalStorage>;

/// 選択画像のプレビュー
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub file_name: String,
    pub object_url: String,
}

impl Preview {
    fn from_file(file: &File) -> Option<Self> {
        let object_url = Url::create_object_url_with_blob(file).ok()?;
        Some(Self {
            file_name: file.name(),
            object_url,
        })
    }
}

/// プレビューURLを解放して空にする
fn clear_previews(previews: RwSignal<Vec<Preview>>) {
    for preview in previews.get_untracked() {
        let _ = Url::revoke_object_url(&preview.object_url);
    }
    previews.set(Vec::new());
}

#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(Session::new(MeatSelection::default()));
    let previews = RwSignal::new(Vec::<Preview>::new());
    let file_input = NodeRef::<html::Input>::new();
    let backend = WebBackend::default();

    // 画像選択ハンドラ
    let on_files_chosen = {
        let backend = backend.clone();
        move |files: Vec<File>| {
            clear_previews(previews);
            previews.set(files.iter().filter_map(Preview::from_file).collect());

            let Some(ticket) = session.try_update(|s| s.choose_images(files)).flatten() else {
                return;
            };
            let images = session.with_untracked(|s| s.images().to_vec());
            let backend = backend.clone();
            spawn_local(async move {
                let outcome = backend.detect_ingredients(&images).await;
                if let Err(e) = &outcome {
                    console::error!("Error uploading images:", e.to_string());
                }
                session.update(|s| {
                    s.apply_upload(ticket, outcome);
                });
            });
        }
    };

    // 肉チップ切替
    let on_toggle_meat = move |label: String| {
        session.update(|s| {
            if let Err(e) = s.toggle_meat(&label) {
                console::error!(e.to_string());
            }
        });
    };

    // 推薦ハンドラ
    let on_recommend = move |_: ()| {
        let pending = match session.try_update(|s| s.begin_recommendation()) {
            Some(Ok(pending)) => pending,
            Some(Err(Error::NoIngredients)) => {
                dialogs::alert(&Error::NoIngredients.to_string());
                return;
            }
            Some(Err(e)) => {
                console::warn!(e.to_string());
                return;
            }
            None => return,
        };

        let backend = backend.clone();
        spawn_local(async move {
            let outcome = backend.recommend(&pending.request).await;
            if let Err(e) = &outcome {
                console::error!("Error getting recommendation:", e.to_string());
            }
            session.update(|s| s.finish_recommendation(pending, outcome));
        });
    };

    // Escで全体リセット
    let _ = window_event_listener(ev::keydown, move |ev| {
        if KeyCommand::from_document_key(&ev.key()) == Some(KeyCommand::Reset) {
            session.update(|s| {
                s.reset();
            });
            clear_previews(previews);
            if let Some(input) = file_input.get_untracked() {
                input.set_value("");
            }
        }
    });

    view! {
        <div class="container">
            <Header />

            <UploadArea
                session=session
                previews=previews
                file_input=file_input
                on_files_chosen=on_files_chosen
            />

            <MeatChips session=session on_toggle=on_toggle_meat />

            <RecommendButton session=session on_recommend=on_recommend />

            <RecommendationPanel session=session />
        </div>
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_file(name: &str) -> File {
        let parts = js_sys::Array::of1(&JsValue::from_str("dummy"));
        File::new_with_str_sequence(&parts, name).unwrap()
    }

    #[wasm_bindgen_test]
    fn wasm_preview_from_file() {
        let preview = Preview::from_file(&test_file("egg.jpg")).unwrap();
        assert_eq!(preview.file_name, "egg.jpg");
        assert!(preview.object_url.starts_with("blob:"));
        let _ = Url::revoke_object_url(&preview.object_url);
    }

    #[wasm_bindgen_test]
    fn wasm_clear_previews_empties_list() {
        let previews = RwSignal::new(
            ["egg.jpg", "onion.png"]
                .iter()
                .filter_map(|name| Preview::from_file(&test_file(name)))
                .collect::<Vec<_>>(),
        );
        assert_eq!(previews.get_untracked().len(), 2);

        clear_previews(previews);
        assert!(previews.get_untracked().is_empty());
    }
}
