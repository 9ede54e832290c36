// src/config.rs

#[cfg(target_arch = "wasm32")]
const DEFAULT_SUBMIT_ENDPOINT: &str = "/submit_quiz";
#[cfg(target_arch = "wasm32")]
const DEFAULT_RESET_ENDPOINT: &str = "/reset_quiz";
#[cfg(target_arch = "wasm32")]
pub const CONTEXT_ELEMENT_ID: &str = "quiz-context";

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_NATIVE_SERVER: &str = "http://127.0.0.1:5000";

/// De dónde sale el contexto inyectado (preguntas, respuestas previas, nota)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextSource {
    /// `<script id="..." type="application/json">` en la página anfitriona
    PageElement(String),
    /// GET a un endpoint que devuelve el JSON
    Remote(String),
    File(std::path::PathBuf),
    Demo,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizConfig {
    pub submit_endpoint: String,
    pub reset_endpoint: String,
    pub context_source: ContextSource,
}

pub fn normalize_endpoint(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Une base y ruta sin duplicar ni perder la barra.
pub fn join_endpoint(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim().trim_start_matches('/');
    format!("{base}/{path}")
}

#[cfg(target_arch = "wasm32")]
impl QuizConfig {
    pub fn resolve() -> Self {
        let submit_endpoint = endpoint_from_build_env()
            .or_else(endpoint_from_querystring)
            .or_else(endpoint_from_meta)
            .unwrap_or_else(|| DEFAULT_SUBMIT_ENDPOINT.to_string());

        Self {
            submit_endpoint,
            reset_endpoint: DEFAULT_RESET_ENDPOINT.to_string(),
            context_source: ContextSource::PageElement(CONTEXT_ELEMENT_ID.to_string()),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_build_env() -> Option<String> {
    option_env!("QUIZ_SESSION_SUBMIT_ENDPOINT").and_then(normalize_endpoint)
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_querystring() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    let query = search.strip_prefix('?').unwrap_or(search.as_str());

    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if key == "submit_endpoint" {
            let decoded = js_sys::decode_uri_component(value).ok()?;
            let decoded = decoded.as_string()?;
            return normalize_endpoint(&decoded);
        }
    }

    None
}

#[cfg(target_arch = "wasm32")]
fn endpoint_from_meta() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector("meta[name='quiz-submit-endpoint']")
        .ok()??;

    meta.get_attribute("content")
        .as_deref()
        .and_then(normalize_endpoint)
}

#[cfg(not(target_arch = "wasm32"))]
impl QuizConfig {
    pub fn resolve() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `resolve` pero con un lector de variables inyectable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let server = lookup("QUIZ_SESSION_SERVER")
            .as_deref()
            .and_then(normalize_endpoint)
            .unwrap_or_else(|| DEFAULT_NATIVE_SERVER.to_string());

        let submit_endpoint = lookup("QUIZ_SESSION_SUBMIT_ENDPOINT")
            .as_deref()
            .and_then(normalize_endpoint)
            .unwrap_or_else(|| join_endpoint(&server, "/submit_quiz"));

        let context_source = match lookup("QUIZ_SESSION_CONTEXT_FILE")
            .as_deref()
            .and_then(normalize_endpoint)
        {
            Some(path) => ContextSource::File(path.into()),
            None => ContextSource::Remote(join_endpoint(&server, "/quiz_context")),
        };

        Self {
            submit_endpoint,
            reset_endpoint: join_endpoint(&server, "/reset_quiz"),
            context_source,
        }
    }
}
