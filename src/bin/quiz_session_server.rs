// Servidor mínimo para probar el cliente sin la página anfitriona:
// sirve el contexto del quiz, corrige los envíos y permite reiniciar.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    server::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod server {
    use std::collections::BTreeMap;
    use std::io::{BufRead, BufReader, Write};
    use std::net::{TcpListener, TcpStream};
    use std::path::Path;
    use std::time::Duration;

    use quiz_session::data::{demo_context, read_context_file};
    use quiz_session::model::{Question, QuizContext};
    use serde::{Deserialize, Serialize};

    const MAX_HEAD_BYTES: usize = 16 * 1024;
    const MAX_BODY_BYTES: usize = 1_000_000;

    #[derive(Debug, Deserialize)]
    struct SubmitBody {
        #[serde(default)]
        answers: BTreeMap<String, String>,
    }

    #[derive(Debug, Serialize)]
    struct SubmitReply {
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    }

    impl SubmitReply {
        fn ok(score: u32) -> Self {
            Self {
                success: true,
                score: Some(score),
                error: None,
            }
        }

        fn failed(message: impl Into<String>) -> Self {
            Self {
                success: false,
                score: None,
                error: Some(message.into()),
            }
        }
    }

    pub(super) struct HttpRequest {
        pub(super) method: String,
        pub(super) path: String,
        headers: Vec<(String, String)>,
        pub(super) body: Vec<u8>,
    }

    #[derive(Debug)]
    pub(super) struct HttpResponse {
        pub(super) status: u16,
        content_type: &'static str,
        pub(super) body: String,
        location: Option<String>,
    }

    /// El quiz tal cual se cargó y la sesión en curso sobre él
    pub(super) struct QuizServer {
        loaded: QuizContext,
        pub(super) current: QuizContext,
    }

    pub fn run() {
        pretty_env_logger::init();

        let loaded = match std::env::var("QUIZ_FILE") {
            Ok(path) => read_context_file(Path::new(&path)),
            Err(_) => demo_context(),
        };
        let loaded = match loaded {
            Ok(ctx) => ctx,
            Err(err) => {
                log::error!("no se pudo cargar el quiz: {err}");
                QuizContext::default()
            }
        };

        let mut server = QuizServer::new(loaded);
        let bind = std::env::var("QUIZ_BIND").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
        let listener = match TcpListener::bind(&bind) {
            Ok(l) => l,
            Err(err) => {
                log::error!("no se pudo abrir {bind}: {err}");
                std::process::exit(1);
            }
        };

        log::info!(
            "quiz server escuchando en http://{bind} ({} preguntas)",
            server.current.quiz_data.len()
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = handle_connection(&mut server, stream) {
                        log::warn!("error en conexión: {err}");
                    }
                }
                Err(err) => log::warn!("error aceptando conexión: {err}"),
            }
        }
    }

    fn handle_connection(server: &mut QuizServer, stream: TcpStream) -> std::io::Result<()> {
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;
        let mut reader = BufReader::new(stream.try_clone()?);

        let response = match read_request(&mut reader) {
            Ok(request) => {
                log::debug!("{} {}", request.method, request.path);
                server.route(&request)
            }
            Err(err) => HttpResponse::text(400, &format!("bad request: {err}")),
        };

        let mut stream = stream;
        response.write_to(&mut stream)
    }

    impl QuizServer {
        pub(super) fn new(loaded: QuizContext) -> Self {
            let current = fresh_session(&loaded);
            Self { loaded, current }
        }

        pub(super) fn route(&mut self, request: &HttpRequest) -> HttpResponse {
            let path = request.path.split('?').next().unwrap_or("");
            match (request.method.as_str(), path) {
                ("OPTIONS", _) => HttpResponse::empty(204),
                ("GET", "/health") => HttpResponse::text(200, "ok"),
                ("GET", "/quiz_context") => HttpResponse::json(200, &self.current),
                ("POST", "/submit_quiz") => self.submit_quiz(request),
                ("GET", "/reset_quiz") => {
                    self.current = fresh_session(&self.loaded);
                    log::info!("sesión reiniciada");
                    HttpResponse::redirect("/quiz_context")
                }
                _ => HttpResponse::text(404, "not found"),
            }
        }

        fn submit_quiz(&mut self, request: &HttpRequest) -> HttpResponse {
            if !self.current.has_quiz() {
                return HttpResponse::json(400, &SubmitReply::failed("No quiz is active."));
            }

            let is_json = request
                .header("content-type")
                .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
                .unwrap_or(false);
            if !is_json {
                return HttpResponse::json(
                    415,
                    &SubmitReply::failed("Only Content-Type: application/json is accepted."),
                );
            }

            let body: SubmitBody = match serde_json::from_slice(&request.body) {
                Ok(b) => b,
                Err(err) => {
                    log::warn!("envío con JSON inválido: {err}");
                    return HttpResponse::json(500, &SubmitReply::failed(err.to_string()));
                }
            };

            let (score, indices) = grade_answers(&self.current.quiz_data, &body.answers);
            self.current.user_answers = indices;
            self.current.score = Some(score);
            self.current.is_submitted = true;
            log::info!(
                "quiz corregido: {score}/{}",
                self.current.quiz_data.len()
            );

            HttpResponse::json(200, &SubmitReply::ok(score))
        }
    }

    fn fresh_session(loaded: &QuizContext) -> QuizContext {
        QuizContext {
            quiz_data: loaded.quiz_data.clone(),
            user_answers: (0..loaded.quiz_data.len())
                .map(|i| (i.to_string(), None))
                .collect(),
            is_submitted: false,
            score: Some(0),
        }
    }

    /// Traduce texto elegido -> índice de opción y cuenta aciertos.
    pub(super) fn grade_answers(
        quiz: &[Question],
        answers: &BTreeMap<String, String>,
    ) -> (u32, BTreeMap<String, Option<usize>>) {
        let mut score = 0;
        let mut indices = BTreeMap::new();

        for (i, question) in quiz.iter().enumerate() {
            let key = i.to_string();
            let selected = answers
                .get(&key)
                .filter(|text| !text.is_empty())
                .and_then(|text| question.option_index(text));

            if selected.is_some_and(|j| question.options[j].is_correct) {
                score += 1;
            }
            indices.insert(key, selected);
        }

        (score, indices)
    }

    /// Lee línea de petición, cabeceras y cuerpo según `Content-Length`.
    pub(super) fn read_request<R: BufRead>(reader: &mut R) -> Result<HttpRequest, String> {
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| format!("lectura: {e}"))?;
        let mut parts = line.split_whitespace();
        let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
            return Err(format!("línea de petición inválida: {:?}", line.trim_end()));
        };
        let mut request = HttpRequest {
            method: method.to_owned(),
            path: path.to_owned(),
            headers: Vec::new(),
            body: Vec::new(),
        };

        let mut head_bytes = line.len();
        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| format!("lectura: {e}"))?;
            head_bytes += n;
            if head_bytes > MAX_HEAD_BYTES {
                return Err("cabeceras demasiado grandes".into());
            }
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if n == 0 || trimmed.is_empty() {
                break;
            }
            let (name, value) = trimmed
                .split_once(':')
                .ok_or_else(|| format!("cabecera sin ':': {trimmed:?}"))?;
            request
                .headers
                .push((name.trim().to_ascii_lowercase(), value.trim().to_owned()));
        }

        let len = match request.header("content-length") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| format!("content-length inválido: {raw}"))?,
            None => 0,
        };
        if len > MAX_BODY_BYTES {
            return Err("cuerpo demasiado grande".into());
        }
        request.body = vec![0; len];
        reader
            .read_exact(&mut request.body)
            .map_err(|e| format!("cuerpo incompleto: {e}"))?;

        Ok(request)
    }

    impl HttpRequest {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    impl HttpResponse {
        fn empty(status: u16) -> Self {
            Self::text(status, "")
        }

        fn text(status: u16, body: &str) -> Self {
            Self {
                status,
                content_type: "text/plain; charset=utf-8",
                body: body.to_owned(),
                location: None,
            }
        }

        fn json<T: Serialize>(status: u16, body: &T) -> Self {
            match serde_json::to_string(body) {
                Ok(json) => Self {
                    status,
                    content_type: "application/json",
                    body: json,
                    location: None,
                },
                Err(err) => Self::text(500, &format!("no se pudo serializar: {err}")),
            }
        }

        fn redirect(location: &str) -> Self {
            Self {
                location: Some(location.to_owned()),
                ..Self::empty(303)
            }
        }

        fn reason(&self) -> &'static str {
            match self.status {
                200 => "OK",
                204 => "No Content",
                303 => "See Other",
                400 => "Bad Request",
                404 => "Not Found",
                415 => "Unsupported Media Type",
                _ => "Internal Server Error",
            }
        }

        /// Siempre `Connection: close`; CORS abierto para el cliente wasm.
        pub(super) fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
            write!(out, "HTTP/1.1 {} {}\r\n", self.status, self.reason())?;
            let mut headers = vec![
                ("Content-Type", self.content_type.to_owned()),
                ("Content-Length", self.body.len().to_string()),
                ("Access-Control-Allow-Origin", "*".to_owned()),
                ("Access-Control-Allow-Methods", "GET, POST, OPTIONS".to_owned()),
                ("Access-Control-Allow-Headers", "Content-Type".to_owned()),
                ("Connection", "close".to_owned()),
            ];
            if let Some(location) = &self.location {
                headers.push(("Location", location.clone()));
            }
            for (name, value) in headers {
                write!(out, "{name}: {value}\r\n")?;
            }
            out.write_all(b"\r\n")?;
            out.write_all(self.body.as_bytes())?;
            out.flush()
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::server::*;
    use quiz_session::data::demo_context;
    use std::collections::BTreeMap;
    use std::io::Cursor;

    fn post(path: &str, body: &str) -> HttpRequest {
        let raw = format!(
            "POST {path} HTTP/1.1\r\nHost: x\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        read_request(&mut Cursor::new(raw)).unwrap()
    }

    fn get(path: &str) -> HttpRequest {
        read_request(&mut Cursor::new(format!("GET {path} HTTP/1.1\r\nHost: x\r\n\r\n"))).unwrap()
    }

    #[test]
    fn request_body_is_read_up_to_content_length() {
        let req = post("/submit_quiz", r#"{"answers":{}}"#);
        assert_eq!(req.method, "POST");
        assert_eq!(req.body, br#"{"answers":{}}"#);
    }

    #[test]
    fn truncated_body_is_rejected() {
        let raw = "POST /submit_quiz HTTP/1.1\r\nContent-Length: 10\r\n\r\n{}";
        assert!(read_request(&mut Cursor::new(raw)).is_err());
    }

    #[test]
    fn reset_redirect_carries_location() {
        let mut server = QuizServer::new(demo_context().unwrap());
        let mut out = Vec::new();
        server.route(&get("/reset_quiz")).write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("HTTP/1.1 303 See Other\r\n"));
        assert!(text.contains("Location: /quiz_context\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
    }

    #[test]
    fn grading_matches_by_text_and_counts_correct() {
        let quiz = demo_context().unwrap().quiz_data;
        let answers: BTreeMap<String, String> = [
            ("0".to_string(), "Paris".to_string()),
            ("1".to_string(), "7".to_string()),
            ("2".to_string(), "nope".to_string()),
        ]
        .into_iter()
        .collect();

        let (score, indices) = grade_answers(&quiz, &answers);
        assert_eq!(score, 1);
        assert_eq!(indices["0"], Some(0));
        assert_eq!(indices["1"], Some(0));
        assert_eq!(indices["2"], None);
        assert_eq!(indices["3"], None);
    }

    #[test]
    fn submit_marks_session_graded() {
        let mut server = QuizServer::new(demo_context().unwrap());
        let resp = server.route(&post(
            "/submit_quiz",
            r#"{"answers":{"0":"Paris","1":"42"}}"#,
        ));
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, r#"{"success":true,"score":2}"#);
        assert!(server.current.is_submitted);
        assert_eq!(server.current.score, Some(2));

        let reset = server.route(&get("/reset_quiz"));
        assert_eq!(reset.status, 303);
        assert!(!server.current.is_submitted);
    }

    #[test]
    fn submit_without_quiz_is_rejected() {
        let mut server = QuizServer::new(Default::default());
        let resp = server.route(&post("/submit_quiz", r#"{"answers":{}}"#));
        assert_eq!(resp.status, 400);
        assert_eq!(resp.body, r#"{"success":false,"error":"No quiz is active."}"#);
    }

    #[test]
    fn invalid_json_reports_failure() {
        let mut server = QuizServer::new(demo_context().unwrap());
        let resp = server.route(&post("/submit_quiz", "{not json"));
        assert_eq!(resp.status, 500);
        assert!(resp.body.contains("\"success\":false"));
    }

    #[test]
    fn unknown_path_is_404() {
        let mut server = QuizServer::new(demo_context().unwrap());
        assert_eq!(server.route(&get("/nope")).status, 404);
        assert_eq!(server.route(&get("/health")).status, 200);
    }
}
