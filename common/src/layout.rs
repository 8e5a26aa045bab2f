//! ページレイアウト定数
//!
//! ホストページ側のCSSクラス名・要素IDと一致させること。

/// 非表示フラグ（クラスベース）
pub const HIDDEN_CLASS: &str = "d-none";

/// 結果グリッドのセル
pub const GRID_CELL_CLASS: &str = "col-6 col-sm-4";

/// 推薦画像・一致画像
pub const IMAGE_CLASS: &str = "img-fluid rounded";

pub const RECOMMENDED_ALT: &str = "Recommended item";
pub const MATCHING_ALT: &str = "Matching item";

/// 一致アイテム表示用のコンテナ
pub const MATCHING_CONTAINER_ID: &str = "matchingItemContainer";
pub const MATCHING_RESULT_ID: &str = "matchingResult";

/// アップロード時のマルチパートフィールド名
pub const UPLOAD_FIELD: &str = "file";
