//! ブラウザ用バックエンド（fetch）
//!
//! `POST /upload` はFormData、`POST /recommend` はJSONで送る。

use recipe_finder_common::{
    Error, RecipeBackend, RecommendRequest, RecommendResponse, Result, UploadResponse,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// ページと同じオリジンのバックエンド
#[derive(Debug, Clone, Default)]
pub struct WebBackend {
    base_url: String,
}

impl WebBackend {
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// JS側の例外をエラーにする
fn js_error(value: JsValue) -> Error {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}

/// リクエストを送り、2xxならボディを返す
async fn fetch_text(request: &Request) -> Result<String> {
    let window = web_sys::window().ok_or_else(|| Error::Transport("window is not available".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    let resp: Response = resp_value.dyn_into().map_err(js_error)?;

    let text = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    let body = text.as_string().unwrap_or_default();

    if resp.ok() {
        Ok(body)
    } else {
        Err(Error::http(resp.status(), body))
    }
}

impl RecipeBackend for WebBackend {
    type Image = File;

    async fn detect_ingredients(&self, images: &[File]) -> Result<Vec<String>> {
        let form = FormData::new().map_err(js_error)?;
        for file in images {
            form.append_with_blob_and_filename("images", file, &file.name())
                .map_err(js_error)?;
        }

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&form);

        let request =
            Request::new_with_str_and_init(&self.endpoint("/upload"), &opts).map_err(js_error)?;
        let body = fetch_text(&request).await?;
        Ok(UploadResponse::parse(&body)?.detected_ingredients)
    }

    async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let body = serde_json::to_string(request)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request =
            Request::new_with_str_and_init(&self.endpoint("/recommend"), &opts).map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        let text = fetch_text(&request).await?;
        RecommendResponse::parse(&text)
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_js_error_keeps_message() {
        let err = js_error(js_sys::Error::new("Failed to fetch").into());
        assert!(matches!(err, Error::Transport(ref m) if m == "Failed to fetch"));
    }

    #[wasm_bindgen_test]
    fn wasm_js_string_error() {
        let err = js_error(JsValue::from_str("aborted"));
        assert!(matches!(err, Error::Transport(ref m) if m == "aborted"));
    }
}
