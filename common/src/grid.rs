//! 結果グリッドのビューモデル

use crate::layout::{GRID_CELL_CLASS, IMAGE_CLASS, MATCHING_ALT, RECOMMENDED_ALT};
use crate::types::RecommendationItem;

/// グリッドのセル1つ（画像1枚）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// 列ラッパのクラス。None なら画像を直接追加する
    pub wrapper_class: Option<&'static str>,
    /// 画像URL。プレースホルダ（url: null）は None
    pub src: Option<String>,
    pub image_class: &'static str,
    pub alt: &'static str,
}

/// 推薦結果を入力順のままセルに変換する（重複除去・並べ替え・絞込みなし）
pub fn recommendation_cells(items: &[RecommendationItem]) -> Vec<GridCell> {
    items
        .iter()
        .map(|item| GridCell {
            wrapper_class: Some(GRID_CELL_CLASS),
            src: item.url.clone(),
            image_class: IMAGE_CLASS,
            alt: RECOMMENDED_ALT,
        })
        .collect()
}

pub fn matching_cell(item: &RecommendationItem) -> GridCell {
    GridCell {
        wrapper_class: None,
        src: item.url.clone(),
        image_class: IMAGE_CLASS,
        alt: MATCHING_ALT,
    }
}
