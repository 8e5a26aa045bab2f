//! アップロードフォーム制御
//!
//! 2つのフォーム（衣類・バーコード）を同じ手順で扱う:
//! ファイル選択 → プレビュー → 送信 → 推薦画像の描画 or アラート
//!
//! DOM操作は `Page`、HTTP送信は `Uploader` に委譲する。

use crate::config::{ControllerConfig, FormConfig, NO_FILE_SELECTED};
use crate::error::{Error, Result};
use crate::grid::{matching_cell, recommendation_cells, GridCell};
use crate::layout::{MATCHING_CONTAINER_ID, MATCHING_RESULT_ID, UPLOAD_FIELD};
use crate::response::{failure_message, interpret_reply, SubmitOutcome, UploadReply};
use crate::types::{FormKind, RecommendationItem};
use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::HashSet;

/// ホストページ（DOM契約）
#[async_trait(?Send)]
pub trait Page {
    type File;

    /// ファイル入力の先頭ファイル。未選択なら None
    fn selected_file(&self, input_id: &str) -> Result<Option<Self::File>>;

    /// ファイルをData URLとして読み込む
    async fn read_data_url(&self, file: &Self::File) -> Result<String>;

    /// プレビュー画像のsrcを設定して表示する
    fn show_preview(&self, preview_id: &str, data_url: &str) -> Result<()>;

    /// `results_id` の中身をセルで置き換え、`container_id` を表示する
    fn replace_cells(&self, container_id: &str, results_id: &str, cells: &[GridCell]) -> Result<()>;

    /// ブロッキングアラート
    fn alert(&self, message: &str);
}

/// マルチパート送信
#[async_trait(?Send)]
pub trait Uploader {
    type File;

    /// `file` をフィールド `field` に入れて `endpoint` へPOSTする。
    /// 通信自体が失敗した場合のみ Err を返す
    async fn post_file(&self, endpoint: &str, field: &str, file: &Self::File) -> Result<UploadReply>;
}

pub struct UploadFormController<P, U> {
    config: ControllerConfig,
    page: P,
    uploader: U,
    in_flight: RefCell<HashSet<FormKind>>,
}

/// 送信中フラグ（drop時に解除）
struct InFlight<'a> {
    forms: &'a RefCell<HashSet<FormKind>>,
    kind: FormKind,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.forms.borrow_mut().remove(&self.kind);
    }
}

impl<P, U> UploadFormController<P, U>
where
    P: Page,
    U: Uploader<File = P::File>,
{
    pub fn new(config: ControllerConfig, page: P, uploader: U) -> Self {
        Self {
            config,
            page,
            uploader,
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn is_in_flight(&self, kind: FormKind) -> bool {
        self.in_flight.borrow().contains(&kind)
    }

    /// 選択ファイルのプレビュー表示
    ///
    /// 未選択なら何もしない。読込失敗はログのみ（ユーザーには通知しない）
    pub async fn show_preview(&self, kind: FormKind) -> Result<()> {
        let Some(file) = self.page.selected_file(&kind.file_input_id())? else {
            return Ok(());
        };

        match self.page.read_data_url(&file).await {
            Ok(data_url) => self.page.show_preview(&kind.preview_id(), &data_url),
            Err(e) => {
                log::warn!("[{}] preview read failed: {}", kind, e);
                Ok(())
            }
        }
    }

    /// 推薦結果を描画（前回の結果は置き換え）
    pub fn display_recommendations(&self, results: &[RecommendationItem], kind: FormKind) -> Result<()> {
        let cells = recommendation_cells(results);
        self.page
            .replace_cells(&kind.container_id(), &kind.results_id(), &cells)
    }

    /// 一致アイテム1件を描画
    ///
    /// どのイベントにも接続していない。一致アイテムを返すエンドポイントが無いため
    pub fn display_matching_item(&self, item: &RecommendationItem) -> Result<()> {
        self.page
            .replace_cells(MATCHING_CONTAINER_ID, MATCHING_RESULT_ID, &[matching_cell(item)])
    }

    /// フォーム送信
    ///
    /// 失敗はすべてアラートで通知し、フォームは再送信可能なまま残る。
    /// 戻り値の Err はページ側の不整合（要素欠落・未設定フォーム）のみ
    pub async fn submit(&self, kind: FormKind) -> Result<()> {
        let form = self
            .config
            .form(kind)
            .ok_or_else(|| Error::Config(format!("form {} is not configured", kind)))?;

        let Some(file) = self.page.selected_file(&kind.file_input_id())? else {
            self.page.alert(NO_FILE_SELECTED);
            return Ok(());
        };

        let _flight = if self.config.single_flight {
            match self.begin(kind) {
                Some(flight) => Some(flight),
                None => {
                    log::debug!("[{}] submission already in flight, ignored", kind);
                    return Ok(());
                }
            }
        } else {
            None
        };

        log::info!("[{}] uploading to {}", kind, form.endpoint);
        let outcome = self.upload(form, &file).await;
        self.apply(kind, outcome)
    }

    fn begin(&self, kind: FormKind) -> Option<InFlight<'_>> {
        if self.in_flight.borrow_mut().insert(kind) {
            Some(InFlight { forms: &self.in_flight, kind })
        } else {
            None
        }
    }

    async fn upload(&self, form: &FormConfig, file: &P::File) -> SubmitOutcome {
        match self.uploader.post_file(&form.endpoint, UPLOAD_FIELD, file).await {
            Ok(reply) => {
                log::debug!("[{}] response status {}", form.kind, reply.status);
                interpret_reply(form, &reply)
            }
            Err(e) => {
                log::error!("[{}] upload failed: {}", form.kind, e);
                SubmitOutcome::Alert(failure_message(None))
            }
        }
    }

    fn apply(&self, kind: FormKind, outcome: SubmitOutcome) -> Result<()> {
        match outcome {
            SubmitOutcome::Render(items) => {
                log::info!("[{}] {} recommendations", kind, items.len());
                self.display_recommendations(&items, kind)
            }
            SubmitOutcome::Alert(message) => {
                log::warn!("[{}] upload rejected: {}", kind, message);
                self.page.alert(&message);
                Ok(())
            }
        }
    }
}
