//! Wardrobe Match Common Library
//!
//! ブラウザ(WASM)側とテストで共有される型・設定・アップロードフォーム制御

pub mod types;
pub mod layout;
pub mod config;
pub mod error;
pub mod response;
pub mod grid;
pub mod controller;

pub use types::{FormKind, RecommendationItem, UploadResponse};
pub use config::{ControllerConfig, FormConfig};
pub use error::{Error, Result};
pub use response::{failure_message, interpret_reply, SubmitOutcome, UploadReply};
pub use grid::{matching_cell, recommendation_cells, GridCell};
pub use controller::{Page, UploadFormController, Uploader};
