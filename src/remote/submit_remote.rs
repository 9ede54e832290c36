use crate::model::SelectionMap;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{Receiver, channel};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmitRequest {
    pub answers: SelectionMap,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub score: Option<u32>,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no se pudo serializar el envío: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("error de red: {0}")]
    Network(String),
    #[error("el servidor devolvió HTTP {status}")]
    Http { status: u16, body: String },
    #[error("respuesta JSON inválida: {0}")]
    InvalidResponse(String),
}

pub type SubmitOutcome = Result<SubmitResponse, SubmitError>;

/// El servidor contesta `{"success": false, "error": ...}` también con 400/500,
/// así que el cuerpo se intenta leer siempre; el status sólo decide el error
/// cuando el cuerpo no es JSON.
pub fn interpret_response(status: u16, body: &str) -> SubmitOutcome {
    match serde_json::from_str::<SubmitResponse>(body) {
        Ok(resp) => Ok(resp),
        Err(_) if !(200..300).contains(&status) => Err(SubmitError::Http {
            status,
            body: body.trim().to_string(),
        }),
        Err(err) => Err(SubmitError::InvalidResponse(err.to_string())),
    }
}

/// Lanza el envío sin bloquear la UI; el resultado llega por el canal.
pub fn spawn_submission(endpoint: String, request: SubmitRequest) -> Receiver<SubmitOutcome> {
    let (tx, rx) = channel::<SubmitOutcome>();

    #[cfg(not(target_arch = "wasm32"))]
    std::thread::spawn(move || {
        let _ = tx.send(post_answers(&endpoint, &request));
    });

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        let _ = tx.send(post_answers(&endpoint, &request).await);
    });

    rx
}

#[cfg(not(target_arch = "wasm32"))]
pub fn post_answers(endpoint: &str, request: &SubmitRequest) -> SubmitOutcome {
    let client = reqwest::blocking::Client::new();
    log::debug!("POST {endpoint} ({} respuestas)", request.answers.len());

    let response = client
        .post(endpoint)
        .json(request)
        .send()
        .map_err(|err| SubmitError::Network(err.to_string()))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .map_err(|err| SubmitError::Network(err.to_string()))?;

    interpret_response(status, &body)
}

#[cfg(target_arch = "wasm32")]
pub async fn post_answers(endpoint: &str, request: &SubmitRequest) -> SubmitOutcome {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let payload_json = serde_json::to_string(request)?;
    log::debug!("POST {endpoint}: {payload_json}");

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(&payload_json));

    let window =
        web_sys::window().ok_or_else(|| SubmitError::Network("no existe window".into()))?;

    let request = Request::new_with_str_and_init(endpoint, &opts)
        .map_err(|err| SubmitError::Network(format!("no se pudo crear el request: {err:?}")))?;

    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|err| SubmitError::Network(format!("no se pudo asignar headers: {err:?}")))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| SubmitError::Network(format!("fetch falló: {err:?}")))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| SubmitError::Network("la respuesta fetch no es un Response".into()))?;

    let text_js = match response.text() {
        Ok(promise) => JsFuture::from(promise).await,
        Err(err) => Err(err),
    };

    let text = text_js
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| SubmitError::Network("no se pudo leer el cuerpo de la respuesta".into()))?;

    interpret_response(response.status(), &text)
}
