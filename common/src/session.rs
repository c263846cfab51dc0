//! ページ1枚分のセッション状態（CLI/WASM共通）
//!
//! 画像選択、肉フィルター、検出食材、推薦ボタン、結果パネルを1つにまとめる。
//! 非同期処理は「開始」と「適用」に分けてあり、ブラウザ側はシグナル越しに
//! それぞれを呼ぶ。CLIとテストは `upload` / `recommend` でまとめて実行する。

use crate::backend::RecipeBackend;
use crate::error::{Error, Result};
use crate::ingredients::DetectionStatus;
use crate::panel::{RecommendTrigger, ResultPanel, TriggerGuard};
use crate::selection::{ChipChange, MeatSelection};
use crate::types::{RecommendRequest, RecommendResponse};

/// アップロード1回分の識別子
///
/// 最新のチケット以外の応答は捨てる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// 送信待ちの推薦リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecommendation {
    ticket: u64,
    pub request: RecommendRequest,
}

#[derive(Debug, Clone)]
pub struct Session<I> {
    images: Vec<I>,
    meat: MeatSelection,
    detection: DetectionStatus,
    trigger: RecommendTrigger,
    panel: ResultPanel,
    upload_seq: u64,
    recommend_seq: u64,
}

impl<I> Default for Session<I> {
    fn default() -> Self {
        Self::new(MeatSelection::default())
    }
}

impl<I> Session<I> {
    pub fn new(meat: MeatSelection) -> Self {
        Self {
            images: Vec::new(),
            meat,
            detection: DetectionStatus::Idle,
            trigger: RecommendTrigger::default(),
            panel: ResultPanel::Placeholder,
            upload_seq: 0,
            recommend_seq: 0,
        }
    }

    pub fn images(&self) -> &[I] {
        &self.images
    }

    pub fn meat(&self) -> &MeatSelection {
        &self.meat
    }

    pub fn detection(&self) -> &DetectionStatus {
        &self.detection
    }

    pub fn trigger(&self) -> &RecommendTrigger {
        &self.trigger
    }

    pub fn panel(&self) -> &ResultPanel {
        &self.panel
    }

    pub fn toggle_meat(&mut self, label: &str) -> Result<Vec<ChipChange>> {
        self.meat.toggle(label)
    }

    // =============================================
    // アップロード
    // =============================================

    /// 画像選択を丸ごと置き換える
    ///
    /// 空なら状態をIdleに戻して `None`。そうでなければDetectingにして
    /// 送信用のチケットを返す。どちらの場合も実行中の古いアップロードは無効になる。
    pub fn choose_images(&mut self, images: Vec<I>) -> Option<UploadTicket> {
        self.upload_seq += 1;
        self.images = images;

        if self.images.is_empty() {
            self.detection = DetectionStatus::Idle;
            return None;
        }

        self.detection = DetectionStatus::Detecting;
        Some(UploadTicket(self.upload_seq))
    }

    /// アップロード結果を反映する。古いチケットなら何もせず `false`
    pub fn apply_upload(&mut self, ticket: UploadTicket, outcome: Result<Vec<String>>) -> bool {
        if ticket.0 != self.upload_seq {
            tracing::debug!(
                "discarding stale upload response (ticket {}, latest {})",
                ticket.0,
                self.upload_seq
            );
            return false;
        }

        self.detection = match outcome {
            Ok(ingredients) => DetectionStatus::from_detected(ingredients),
            Err(e) => {
                tracing::warn!("Error uploading images: {}", e);
                DetectionStatus::Error(e.to_string())
            }
        };
        true
    }

    /// 画像を使わず食材を直接指定する
    pub fn set_ingredients(&mut self, ingredients: Vec<String>) {
        self.upload_seq += 1;
        self.images.clear();
        self.detection = DetectionStatus::from_detected(ingredients);
    }

    /// 画像を選んで食材検出まで行う
    pub async fn upload<B>(&mut self, backend: &B, images: Vec<I>) -> &DetectionStatus
    where
        B: RecipeBackend<Image = I>,
    {
        if let Some(ticket) = self.choose_images(images) {
            let outcome = backend.detect_ingredients(&self.images).await;
            self.apply_upload(ticket, outcome);
        }
        &self.detection
    }

    // =============================================
    // 推薦
    // =============================================

    /// 推薦リクエストを開始する
    ///
    /// 食材が検出済みでなければ `Error::NoIngredients`（状態は変えない）。
    /// 成功時はボタンを無効化し、パネルを検索中にする。
    pub fn begin_recommendation(&mut self) -> Result<PendingRecommendation> {
        let ingredients = self
            .detection
            .ingredients()
            .ok_or(Error::NoIngredients)?
            .to_vec();
        if !self.trigger.is_enabled() {
            return Err(Error::Busy);
        }

        self.recommend_seq += 1;
        self.trigger.engage();
        self.panel = ResultPanel::Searching;

        Ok(PendingRecommendation {
            ticket: self.recommend_seq,
            request: RecommendRequest {
                ingredients,
                meat: self.meat.selected_labels(),
            },
        })
    }

    /// 推薦結果を反映する。結果に関係なくボタンは元に戻す
    pub fn finish_recommendation(
        &mut self,
        pending: PendingRecommendation,
        outcome: Result<RecommendResponse>,
    ) {
        self.trigger.release();

        if pending.ticket != self.recommend_seq {
            tracing::debug!("discarding stale recommendation (ticket {})", pending.ticket);
            return;
        }

        self.panel = match outcome {
            Ok(response) => ResultPanel::Ready(response.into_recommendation()),
            Err(e) => {
                tracing::warn!("Error getting recommendation: {}", e);
                ResultPanel::Failed(e.to_string())
            }
        };
    }

    /// 推薦を要求して結果パネルを更新する
    pub async fn recommend<B>(&mut self, backend: &B) -> Result<&ResultPanel>
    where
        B: RecipeBackend<Image = I>,
    {
        let pending = self.begin_recommendation()?;
        let outcome = {
            let _busy = TriggerGuard::new(&mut self.trigger);
            backend.recommend(&pending.request).await
        };
        self.finish_recommendation(pending, outcome);
        Ok(&self.panel)
    }

    // =============================================
    // リセット
    // =============================================

    /// 画面を初期状態に戻す（Escキー）
    ///
    /// 実行中のアップロード/推薦の応答は以後反映されない。
    pub fn reset(&mut self) -> Vec<ChipChange> {
        self.upload_seq += 1;
        self.recommend_seq += 1;
        self.images.clear();
        self.detection = DetectionStatus::Idle;
        self.panel = ResultPanel::Placeholder;
        self.meat.reset()
    }
}
