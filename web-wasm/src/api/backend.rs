//! 解析API連携（fetch）
//!
//! web-sys の fetch で Transport を実装する。
//! fetch 自体が reject された場合（接続不可・CORS拒否）は BackendUnreachable とする。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData, Request, RequestInit, RequestMode, Response};
use serde_json::Value;
use legalease_common::{
    check_status, parse_body, ClientConfig, Endpoint, FileUpload, Transport, TransportError,
    FILE_FIELD,
};

/// fetch による Transport
#[derive(Clone)]
pub struct FetchTransport {
    config: ClientConfig,
}

impl FetchTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// 1回分の通信（共通処理）
    async fn call(&self, endpoint: Endpoint, opts: RequestInit, json: bool) -> Result<Value, TransportError> {
        let url = self.config.endpoint_url(endpoint);
        opts.set_mode(RequestMode::Cors);

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        if json {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| TransportError::Network("window is not available".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|_| TransportError::BackendUnreachable {
                base_url: self.config.base_url().to_string(),
            })?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = check_status(resp.status(), text.as_string().unwrap_or_default())?;
        parse_body(&body)
    }
}

impl Transport for FetchTransport {
    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> Result<Value, TransportError> {
        let body = serde_json::to_string(body)
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));
        self.call(endpoint, opts, true).await
    }

    async fn post_multipart(&self, endpoint: Endpoint, upload: &FileUpload) -> Result<Value, TransportError> {
        let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let bag = BlobPropertyBag::new();
        if let Some(mime) = upload.mime_hint.as_deref() {
            bag.set_type(mime);
        }
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag).map_err(js_error)?;

        let form = FormData::new().map_err(js_error)?;
        form.append_with_blob_and_filename(FILE_FIELD, &blob, &upload.filename)
            .map_err(js_error)?;

        // Content-Type はブラウザが boundary 付きで設定する
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&form);
        self.call(endpoint, opts, false).await
    }

    async fn get_json(&self, endpoint: Endpoint) -> Result<Value, TransportError> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        self.call(endpoint, opts, false).await
    }
}

/// 選択されたファイルを読み込んでアップロード用データにする
pub async fn read_upload(file: &File) -> Result<FileUpload, TransportError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| TransportError::Network(format!("could not read file: {:?}", e)))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime = file.type_();

    Ok(FileUpload {
        filename: file.name(),
        bytes,
        mime_hint: if mime.is_empty() { None } else { Some(mime) },
    })
}

fn js_error(value: JsValue) -> TransportError {
    TransportError::Network(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}
