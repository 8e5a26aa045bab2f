//! アップロード応答の解釈
//!
//! 判定順:
//! 1. 本文がJSON → success/recommendations/error をフィールドごとに読んで描画 or アラート
//! 2. JSONでない → `failure_message` の3段フォールバック
//!    (JSONの `error` > 生テキスト > 汎用メッセージ)
//! 3. 本文が取得できない（通信失敗） → 汎用メッセージ

use crate::config::{FormConfig, GENERIC_ERROR, REQUEST_FAILED};
use crate::types::{RecommendationItem, UploadResponse};
use serde_json::Value;

/// HTTP応答（ステータスは判定に使わない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReply {
    pub status: u16,
    /// 本文を取得できなかった場合は None
    pub body: Option<String>,
}

impl UploadReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: Some(body.into()) }
    }
}

/// 送信1回分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Render(Vec<RecommendationItem>),
    Alert(String),
}

pub fn interpret_reply(form: &FormConfig, reply: &UploadReply) -> SubmitOutcome {
    let Some(body) = reply.body.as_deref() else {
        return SubmitOutcome::Alert(REQUEST_FAILED.to_string());
    };

    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("[{}] response is not JSON: {}", form.kind, e);
            return SubmitOutcome::Alert(failure_message(Some(body)));
        }
    };

    match UploadResponse::from_value(&value) {
        UploadResponse { success: true, recommendations: Some(items), .. } => {
            SubmitOutcome::Render(items)
        }
        resp => SubmitOutcome::Alert(
            resp.error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| form.fallback_message.clone()),
        ),
    }
}

/// 失敗時のメッセージ（3段フォールバック）
pub fn failure_message(body: Option<&str>) -> String {
    let Some(text) = body else {
        return REQUEST_FAILED.to_string();
    };

    match serde_json::from_str::<Value>(text) {
        Ok(value) => value
            .get("error")
            .and_then(Value::as_str)
            .filter(|e| !e.is_empty())
            .unwrap_or(GENERIC_ERROR)
            .to_string(),
        Err(_) if !text.is_empty() => text.to_string(),
        Err(_) => GENERIC_ERROR.to_string(),
    }
}
