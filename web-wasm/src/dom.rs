//! ホストページのDOM操作
//!
//! 要素IDで参照し、表示/非表示は `d-none` クラスで切り替える。

use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;
use wardrobe_match_common::layout::HIDDEN_CLASS;
use wardrobe_match_common::{Error, GridCell, Page, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, File, FileReader, HtmlImageElement, HtmlInputElement, ProgressEvent};

/// JsValueのエラーを文字列化
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn dom_error(value: JsValue) -> Error {
    Error::Dom(describe(&value))
}

#[derive(Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self, id: &str) -> Result<Element> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }

    fn typed<T: JsCast>(&self, id: &str) -> Result<T> {
        self.element(id)?
            .dyn_into::<T>()
            .map_err(|_| Error::Dom(format!("#{} has an unexpected element type", id)))
    }

    fn create<T: JsCast>(&self, tag: &str) -> Result<T> {
        self.document
            .create_element(tag)
            .map_err(dom_error)?
            .dyn_into::<T>()
            .map_err(|_| Error::Dom(format!("<{}> has an unexpected element type", tag)))
    }

    fn build_cell(&self, cell: &GridCell) -> Result<Element> {
        let img: HtmlImageElement = self.create("img")?;
        if let Some(src) = &cell.src {
            img.set_src(src);
        }
        img.set_class_name(cell.image_class);
        img.set_alt(cell.alt);

        match cell.wrapper_class {
            Some(class) => {
                let col: Element = self.create("div")?;
                col.set_class_name(class);
                col.append_child(&img).map_err(dom_error)?;
                Ok(col)
            }
            None => Ok(img.into()),
        }
    }
}

fn unhide(element: &Element) -> Result<()> {
    element.class_list().remove_1(HIDDEN_CLASS).map_err(dom_error)
}

#[async_trait(?Send)]
impl Page for DomPage {
    type File = File;

    fn selected_file(&self, input_id: &str) -> Result<Option<File>> {
        let input: HtmlInputElement = self.typed(input_id)?;
        Ok(input.files().and_then(|files| files.get(0)))
    }

    async fn read_data_url(&self, file: &File) -> Result<String> {
        let reader = FileReader::new().map_err(dom_error)?;
        let (tx, rx) = oneshot::channel::<Result<String>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let onload = {
            let reader = reader.clone();
            let tx = tx.clone();
            Closure::wrap(Box::new(move |_: ProgressEvent| {
                let result = reader.result().map_err(dom_error).and_then(|value| {
                    value
                        .as_string()
                        .ok_or_else(|| Error::Dom("FileReader result is not a string".into()))
                });
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(result);
                }
            }) as Box<dyn FnMut(_)>)
        };

        let onerror = {
            let tx = tx.clone();
            let name = file.name();
            Closure::wrap(Box::new(move |_: ProgressEvent| {
                if let Some(tx) = tx.borrow_mut().take() {
                    let _ = tx.send(Err(Error::Dom(format!("could not read {}", name))));
                }
            }) as Box<dyn FnMut(_)>)
        };

        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        reader.read_as_data_url(file).map_err(dom_error)?;

        let result = rx
            .await
            .map_err(|_| Error::Dom("file read was cancelled".into()));

        reader.set_onload(None);
        reader.set_onerror(None);
        result?
    }

    fn show_preview(&self, preview_id: &str, data_url: &str) -> Result<()> {
        let preview: HtmlImageElement = self.typed(preview_id)?;
        preview.set_src(data_url);
        unhide(&preview)
    }

    fn replace_cells(&self, container_id: &str, results_id: &str, cells: &[GridCell]) -> Result<()> {
        let container = self.element(container_id)?;
        let results = self.element(results_id)?;

        results.set_inner_html("");
        for cell in cells {
            let node = self.build_cell(cell)?;
            results.append_child(&node).map_err(dom_error)?;
        }

        unhide(&container)
    }

    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}
