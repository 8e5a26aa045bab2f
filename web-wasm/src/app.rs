//! 起動処理とイベント接続
//!
//! DOM準備完了時に一度だけ `initialize` を呼び、
//! 各フォームのファイル入力(change)と送信(submit)をコントローラに接続する。

use crate::dom::{describe, DomPage};
use crate::fetch::FetchUploader;
use gloo::events::{EventListener, EventListenerOptions};
use std::rc::Rc;
use wardrobe_match_common::{ControllerConfig, Error, FormKind, Result, UploadFormController};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Window};

/// ホストページが設定を渡すためのグローバル変数名
pub const CONFIG_GLOBAL: &str = "WARDROBE_MATCH_CONFIG";

type Controller = UploadFormController<DomPage, FetchUploader>;

/// `window.WARDROBE_MATCH_CONFIG` があれば読み込む。無ければ既定値
pub fn load_config(window: &Window) -> Result<ControllerConfig> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
        .map_err(|e| Error::Config(describe(&e)))?;

    if value.is_undefined() || value.is_null() {
        return Ok(ControllerConfig::default());
    }

    let config: ControllerConfig = serde_wasm_bindgen::from_value(value)
        .map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// DOM準備完了を待って初期化する
pub(crate) fn start() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("no document available, upload forms not initialized");
        return;
    };

    if document.ready_state() == "loading" {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| run(&document)).forget();
    } else {
        run(&document);
    }
}

fn run(document: &Document) {
    if let Err(e) = initialize(document) {
        log::error!("upload forms not initialized: {}", e);
    }
}

/// 初期化（ページにつき一度だけ）
///
/// 全フォームの要素がそろっていることを確認してからリスナーを接続する。
/// 1つでも欠けていればどのフォームにも接続しない
pub fn initialize(document: &Document) -> Result<()> {
    let window = web_sys::window().ok_or_else(|| Error::Dom("no window".into()))?;
    let config = load_config(&window)?;

    let page = DomPage::new(document.clone());
    let controller = Rc::new(UploadFormController::new(config, page, FetchUploader::new(window)));

    let forms = controller
        .config()
        .forms
        .iter()
        .map(|f| FormElements::find(controller.page(), f.kind))
        .collect::<Result<Vec<_>>>()?;

    for form in &forms {
        form.bind(&controller);
    }

    log::info!(
        "upload forms initialized: {}",
        forms.iter().map(|f| f.kind.as_str()).collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

/// フォーム1件分の接続先
struct FormElements {
    kind: FormKind,
    input: Element,
    form: Element,
}

impl FormElements {
    fn find(page: &DomPage, kind: FormKind) -> Result<Self> {
        let input = page.element(&kind.file_input_id())?;
        let form = page.element(&kind.form_id())?;
        // 描画先が欠けていれば起動時に検出する
        page.element(&kind.preview_id())?;
        page.element(&kind.container_id())?;
        page.element(&kind.results_id())?;
        Ok(Self { kind, input, form })
    }

    fn bind(&self, controller: &Rc<Controller>) {
        let kind = self.kind;

        let on_change = {
            let controller = controller.clone();
            move |_: &web_sys::Event| {
                let controller = controller.clone();
                spawn_local(async move {
                    if let Err(e) = controller.show_preview(kind).await {
                        log::error!("[{}] preview failed: {}", kind, e);
                    }
                });
            }
        };
        EventListener::new(&self.input, "change", on_change).forget();

        let on_submit = {
            let controller = controller.clone();
            move |event: &web_sys::Event| {
                event.prevent_default();
                let controller = controller.clone();
                spawn_local(async move {
                    if let Err(e) = controller.submit(kind).await {
                        log::error!("[{}] submit failed: {}", kind, e);
                    }
                });
            }
        };
        EventListener::new_with_options(
            &self.form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            on_submit,
        )
        .forget();
    }
}
