//! アップロードAPIのワイヤ型とフォーム種別
//!
//! - FormKind: 衣類フォーム / バーコードフォーム
//! - RecommendationItem: サーバが返す推薦画像の参照
//! - UploadResponse: `/upload_*` のJSONレスポンス

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// フォーム種別
///
/// DOM要素IDは命名規則 `<type>File`, `<type>RecommendationResults` 等で導出する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Clothing,
    Barcode,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Clothing, FormKind::Barcode];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Clothing => "clothing",
            FormKind::Barcode => "barcode",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            FormKind::Clothing => "/upload_clothing",
            FormKind::Barcode => "/upload_barcode",
        }
    }

    pub fn file_input_id(&self) -> String {
        format!("{}File", self.as_str())
    }

    pub fn preview_id(&self) -> String {
        format!("{}Preview", self.as_str())
    }

    pub fn form_id(&self) -> String {
        format!("{}Form", self.as_str())
    }

    pub fn container_id(&self) -> String {
        format!("{}RecommendationsContainer", self.as_str())
    }

    pub fn results_id(&self) -> String {
        format!("{}RecommendationResults", self.as_str())
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 推薦アイテム
///
/// 衣類の推薦は件数合わせのため `{"path": null, "url": null}` で埋められることがある。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(default)]
    pub url: Option<String>,
}

impl RecommendationItem {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: Some(url.into()) }
    }

    /// JSON値から変換する。文字列・数値のurlはそのまま使い、それ以外は None
    pub fn from_value(value: &Value) -> Self {
        let url = match value.get("url") {
            Some(Value::String(url)) => Some(url.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        Self { url }
    }
}

/// `/upload_clothing`, `/upload_barcode` のレスポンス
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub recommendations: Option<Vec<RecommendationItem>>,

    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    /// フィールドごとに読み取る。型の合わないフィールドは未指定として扱う
    pub fn from_value(value: &Value) -> Self {
        Self {
            success: value.get("success").and_then(Value::as_bool).unwrap_or(false),
            recommendations: value
                .get("recommendations")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(RecommendationItem::from_value).collect()),
            error: value.get("error").and_then(Value::as_str).map(str::to_string),
        }
    }
}
