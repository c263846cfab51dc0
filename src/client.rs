//! バックエンドHTTPクライアント
//!
//! `POST /upload`（multipart）と `POST /recommend`（JSON）を呼ぶ。

use crate::error::Result;
use crate::scanner::ImageInfo;
use recipe_finder_common::{
    Error as CommonError, RecipeBackend, RecommendRequest, RecommendResponse, UploadResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::Duration;

pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// `timeout_seconds` が0ならタイムアウトなし
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let mut builder = Client::builder();
        if timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_seconds));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/uploads/x.png` のような相対パスをサーバー基準のURLにする
    pub fn resolve_image_url(&self, image: &str) -> String {
        if image.starts_with("http://") || image.starts_with("https://") {
            image.to_string()
        } else {
            format!("{}/{}", self.base_url, image.trim_start_matches('/'))
        }
    }
}

/// 2xx以外はボディ付きのエラーにする
async fn read_success_body(response: Response) -> recipe_finder_common::Result<String> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CommonError::Transport(e.to_string()))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(CommonError::http(status.as_u16(), body))
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/jpeg"
    }
}

impl RecipeBackend for HttpBackend {
    type Image = ImageInfo;

    async fn detect_ingredients(
        &self,
        images: &[ImageInfo],
    ) -> recipe_finder_common::Result<Vec<String>> {
        let mut form = Form::new();
        for image in images {
            let bytes = tokio::fs::read(&image.path).await.map_err(|e| {
                CommonError::Transport(format!("{}: {}", image.path.display(), e))
            })?;
            let part = Part::bytes(bytes)
                .file_name(image.file_name.clone())
                .mime_str(mime_for(&image.file_name))
                .map_err(|e| CommonError::Transport(e.to_string()))?;
            form = form.part("images", part);
        }

        tracing::debug!("POST /upload ({} images)", images.len());
        let response = self
            .client
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| CommonError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        Ok(UploadResponse::parse(&body)?.detected_ingredients)
    }

    async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> recipe_finder_common::Result<RecommendResponse> {
        tracing::debug!(
            "POST /recommend ingredients={:?} meat={:?}",
            request.ingredients,
            request.meat
        );
        let response = self
            .client
            .post(self.endpoint("/recommend"))
            .json(request)
            .send()
            .await
            .map_err(|e| CommonError::Transport(e.to_string()))?;

        let body = read_success_body(response).await?;
        RecommendResponse::parse(&body)
    }
}
