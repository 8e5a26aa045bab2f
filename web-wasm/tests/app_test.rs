//! 起動処理テスト（ブラウザで実行）
//!
//! wasm-pack test --headless --firefox web-wasm

#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Reflect, JSON};
use wardrobe_match_common::{Error, FormKind};
use wardrobe_match_wasm::{initialize, load_config};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{DataTransfer, Element, Event, EventInit, File, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const CONFIG_GLOBAL: &str = "WARDROBE_MATCH_CONFIG";

fn window() -> web_sys::Window {
    web_sys::window().unwrap()
}

fn document() -> web_sys::Document {
    window().document().unwrap()
}

fn set_config(json: &str) {
    let value = JSON::parse(json).unwrap();
    Reflect::set(&window(), &CONFIG_GLOBAL.into(), &value).unwrap();
}

fn clear_config() {
    Reflect::delete_property(&window(), &CONFIG_GLOBAL.into()).unwrap();
}

/// ホストページ相当の要素を作る
fn fixture(kinds: &[FormKind]) -> Vec<Element> {
    let doc = document();
    let body = doc.body().unwrap();
    let mut elements = Vec::new();
    for kind in kinds {
        for (tag, id, class) in [
            ("input", kind.file_input_id(), ""),
            ("img", kind.preview_id(), "d-none"),
            ("form", kind.form_id(), ""),
            ("div", kind.container_id(), "d-none"),
            ("div", kind.results_id(), "row"),
        ] {
            let el = doc.create_element(tag).unwrap();
            el.set_id(&id);
            el.set_class_name(class);
            if tag == "input" {
                el.set_attribute("type", "file").unwrap();
            }
            body.append_child(&el).unwrap();
            elements.push(el);
        }
    }
    elements
}

fn remove_all(elements: Vec<Element>) {
    for el in elements {
        el.remove();
    }
}

fn submit_event() -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    Event::new_with_event_init_dict("submit", &init).unwrap()
}

/// window.alert を記録用の関数に差し替える
fn record_alerts() {
    let recorder = Function::new_with_args("m", "(window.__alerts = window.__alerts || []).push(m)");
    Reflect::set(&window(), &"alert".into(), &recorder).unwrap();
    Reflect::set(&window(), &"__alerts".into(), &js_sys::Array::new()).unwrap();
}

fn recorded_alerts() -> Vec<String> {
    let alerts: js_sys::Array = Reflect::get(&window(), &"__alerts".into()).unwrap().unchecked_into();
    alerts.iter().filter_map(|v| v.as_string()).collect()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        window()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// 設定の読込（未指定・camelCase上書き・検証エラー）
#[wasm_bindgen_test]
fn test_load_config_from_window() {
    clear_config();
    let config = load_config(&window()).unwrap();
    assert_eq!(config.forms.len(), 2);
    assert!(config.single_flight);

    set_config(
        r#"{"forms": [{"kind": "barcode", "endpoint": "/scan", "fallbackMessage": "Scan failed"}], "singleFlight": false}"#,
    );
    let config = load_config(&window()).unwrap();
    assert!(!config.single_flight);
    let barcode = config.form(FormKind::Barcode).unwrap();
    assert_eq!(barcode.endpoint, "/scan");
    assert_eq!(barcode.fallback_message, "Scan failed");
    assert!(config.form(FormKind::Clothing).is_none());

    set_config(r#"{"forms": [{"kind": "clothing", "endpoint": ""}]}"#);
    assert!(matches!(load_config(&window()), Err(Error::Config(_))));

    set_config(r#"{"forms": [{"kind": "shoes", "endpoint": "/x"}]}"#);
    assert!(matches!(load_config(&window()), Err(Error::Config(_))));

    clear_config();
}

/// 初期化後、送信はページ遷移を止めてコントローラに渡り、ファイル選択でプレビューが出る
#[wasm_bindgen_test]
async fn test_initialize_wires_forms() {
    clear_config();
    record_alerts();
    let elements = fixture(&FormKind::ALL);

    initialize(&document()).unwrap();

    let form = document().get_element_by_id("clothingForm").unwrap();
    let event = submit_event();
    form.dispatch_event(&event).unwrap();
    assert!(event.default_prevented());

    sleep(20).await;
    assert_eq!(recorded_alerts(), vec!["No selected file".to_string()]);

    let parts = js_sys::Array::of1(&JsValue::from_str("png-bytes"));
    let file = File::new_with_str_sequence(&parts, "shirt.png").unwrap();
    let transfer = DataTransfer::new().unwrap();
    transfer.items().add_with_file(&file).unwrap();
    let input: HtmlInputElement = document()
        .get_element_by_id("clothingFile")
        .unwrap()
        .dyn_into()
        .unwrap();
    input.set_files(transfer.files().as_ref());
    input.dispatch_event(&Event::new("change").unwrap()).unwrap();

    let preview = document().get_element_by_id("clothingPreview").unwrap();
    for _ in 0..50 {
        if !preview.class_list().contains("d-none") {
            break;
        }
        sleep(10).await;
    }
    assert!(!preview.class_list().contains("d-none"));
    assert!(preview.get_attribute("src").unwrap().starts_with("data:"));
    let barcode_preview = document().get_element_by_id("barcodePreview").unwrap();
    assert!(barcode_preview.class_list().contains("d-none"));

    remove_all(elements);
}

/// 要素が欠けていればどのフォームにも接続しない
#[wasm_bindgen_test]
fn test_initialize_missing_form_binds_nothing() {
    clear_config();
    let elements = fixture(&[FormKind::Clothing]);

    let err = initialize(&document()).unwrap_err();
    assert!(matches!(err, Error::MissingElement(ref id) if id == "barcodeFile"));

    let form = document().get_element_by_id("clothingForm").unwrap();
    let event = submit_event();
    form.dispatch_event(&event).unwrap();
    assert!(!event.default_prevented());

    remove_all(elements);
}
