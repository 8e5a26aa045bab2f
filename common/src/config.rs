//! コントローラ設定
//!
//! ホストページから `window.WARDROBE_MATCH_CONFIG` で上書きできる。
//! 指定が無ければ既定値（`/upload_clothing`, `/upload_barcode`）を使う。

use crate::error::{Error, Result};
use crate::types::FormKind;
use serde::{Deserialize, Serialize};

pub const GENERIC_ERROR: &str = "An error occurred";
pub const BARCODE_ERROR: &str = "An error occurred processing the barcode";
pub const REQUEST_FAILED: &str = "An error occurred while processing your request";
pub const NO_FILE_SELECTED: &str = "No selected file";

/// フォーム1件分の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    pub kind: FormKind,
    pub endpoint: String,

    /// サーバが `error` を返さなかった場合のメッセージ
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
}

impl FormConfig {
    pub fn new(kind: FormKind) -> Self {
        let fallback_message = match kind {
            FormKind::Clothing => GENERIC_ERROR,
            FormKind::Barcode => BARCODE_ERROR,
        };
        Self {
            kind,
            endpoint: kind.default_endpoint().to_string(),
            fallback_message: fallback_message.to_string(),
        }
    }
}

fn default_fallback_message() -> String {
    GENERIC_ERROR.to_string()
}

fn default_forms() -> Vec<FormConfig> {
    FormKind::ALL.iter().map(|kind| FormConfig::new(*kind)).collect()
}

fn default_single_flight() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerConfig {
    #[serde(default = "default_forms")]
    pub forms: Vec<FormConfig>,

    /// 送信中のフォームへの再送信を無視する（既定: true）
    ///
    /// 無効にするとフォームごとの同時送信数は無制限になる。
    /// ページ側からは `singleFlight: false` で切り替える
    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            forms: default_forms(),
            single_flight: default_single_flight(),
        }
    }
}

impl ControllerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ControllerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (i, form) in self.forms.iter().enumerate() {
            if form.endpoint.trim().is_empty() {
                return Err(Error::Config(format!("endpoint for {} is empty", form.kind)));
            }
            if self.forms[..i].iter().any(|f| f.kind == form.kind) {
                return Err(Error::Config(format!("form {} is configured twice", form.kind)));
            }
        }
        Ok(())
    }

    pub fn form(&self, kind: FormKind) -> Option<&FormConfig> {
        self.forms.iter().find(|f| f.kind == kind)
    }
}
