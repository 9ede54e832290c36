use crate::config::ContextSource;
use crate::data::{ContextError, demo_context, parse_context_json, read_context_file};
use crate::model::QuizContext;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{Receiver, channel};

pub type ContextOutcome = Result<QuizContext, ContextError>;

pub fn load_context(source: &ContextSource) -> Result<QuizContext, ContextError> {
    match source {
        ContextSource::Demo => demo_context(),
        ContextSource::File(path) => read_context_file(path),
        ContextSource::Remote(url) => fetch_context(url),
        ContextSource::PageElement(id) => read_page_element(id),
    }
}

/// Carga el contexto en un hilo aparte; el resultado llega por el canal.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_context_load(source: ContextSource) -> Receiver<ContextOutcome> {
    let (tx, rx) = channel::<ContextOutcome>();
    std::thread::spawn(move || {
        let _ = tx.send(load_context(&source));
    });
    rx
}

/// Reinicia en el servidor y después trae el contexto limpio.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_reset(endpoint: String, source: ContextSource) -> Receiver<ContextOutcome> {
    let (tx, rx) = channel::<ContextOutcome>();
    std::thread::spawn(move || {
        let outcome = request_reset(&endpoint).and_then(|()| load_context(&source));
        let _ = tx.send(outcome);
    });
    rx
}

#[cfg(not(target_arch = "wasm32"))]
fn fetch_context(url: &str) -> Result<QuizContext, ContextError> {
    let body = reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|err| ContextError::Unavailable(format!("{url}: {err}")))?;
    parse_context_json(&body)
}

#[cfg(target_arch = "wasm32")]
fn fetch_context(url: &str) -> Result<QuizContext, ContextError> {
    Err(ContextError::Unavailable(format!(
        "{url}: en la web el contexto viene embebido en la página"
    )))
}

#[cfg(target_arch = "wasm32")]
fn read_page_element(id: &str) -> Result<QuizContext, ContextError> {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .ok_or_else(|| ContextError::Unavailable(format!("no existe #{id} en la página")))?;

    let raw = element.text_content().unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(QuizContext::default());
    }
    parse_context_json(&raw)
}

#[cfg(not(target_arch = "wasm32"))]
fn read_page_element(id: &str) -> Result<QuizContext, ContextError> {
    Err(ContextError::Unavailable(format!(
        "#{id}: no hay página anfitriona fuera del navegador"
    )))
}

/// Pide al servidor que olvide el quiz actual.
#[cfg(not(target_arch = "wasm32"))]
pub fn request_reset(endpoint: &str) -> Result<(), ContextError> {
    reqwest::blocking::get(endpoint)
        .and_then(|resp| resp.error_for_status())
        .map(|_| ())
        .map_err(|err| ContextError::Unavailable(format!("{endpoint}: {err}")))
}

/// En la web el reinicio es una navegación: el servidor redirige a la portada.
#[cfg(target_arch = "wasm32")]
pub fn request_reset(endpoint: &str) -> Result<(), ContextError> {
    let location = web_sys::window()
        .ok_or_else(|| ContextError::Unavailable("no existe window".into()))?
        .location();
    location
        .set_href(endpoint)
        .map_err(|err| ContextError::Unavailable(format!("{endpoint}: {err:?}")))
}

#[cfg(target_arch = "wasm32")]
pub fn reload_page() -> Result<(), ContextError> {
    web_sys::window()
        .ok_or_else(|| ContextError::Unavailable("no existe window".into()))?
        .location()
        .reload()
        .map_err(|err| ContextError::Unavailable(format!("reload falló: {err:?}")))
}
