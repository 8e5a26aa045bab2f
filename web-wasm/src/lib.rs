//! Wardrobe Match upload forms (WASM)

mod app;
mod dom;
mod fetch;

pub use app::{initialize, load_config};
pub use dom::DomPage;
pub use fetch::{upload_form_data, FetchUploader};

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // 二重初期化時はロガー設定済みなので無視する
    let _ = console_log::init_with_level(log::Level::Info);
    app::start();
}
