//! fetchによるマルチパート送信

use crate::dom::describe;
use async_trait::async_trait;
use wardrobe_match_common::{Error, Result, UploadReply, Uploader};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response, Window};

fn transport_error(value: wasm_bindgen::JsValue) -> Error {
    Error::Transport(describe(&value))
}

/// ファイル1件だけを含むマルチパート本文（ファイル名も送る）
pub fn upload_form_data(field: &str, file: &File) -> Result<FormData> {
    let form = FormData::new().map_err(transport_error)?;
    form.append_with_blob_and_filename(field, file, &file.name())
        .map_err(transport_error)?;
    Ok(form)
}

pub struct FetchUploader {
    window: Window,
}

impl FetchUploader {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Uploader for FetchUploader {
    type File = File;

    async fn post_file(&self, endpoint: &str, field: &str, file: &File) -> Result<UploadReply> {
        let form = upload_form_data(field, file)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);

        let request = Request::new_with_str_and_init(endpoint, &opts).map_err(transport_error)?;
        let value = JsFuture::from(self.window.fetch_with_request(&request))
            .await
            .map_err(transport_error)?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| Error::Transport("fetch did not return a Response".into()))?;

        // 本文が読めない場合は None（汎用メッセージにフォールバック）
        let body = match response.text() {
            Ok(promise) => match JsFuture::from(promise).await {
                Ok(text) => text.as_string(),
                Err(e) => {
                    log::warn!("could not read response body from {}: {}", endpoint, describe(&e));
                    None
                }
            },
            Err(e) => {
                log::warn!("could not read response body from {}: {}", endpoint, describe(&e));
                None
            }
        };

        Ok(UploadReply {
            status: response.status(),
            body,
        })
    }
}
