// src/data.rs

use crate::model::{Question, QuizContext, SelectionMap};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("JSON de contexto inválido: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML de contexto inválido: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no se pudo leer {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("no se pudo obtener el contexto: {0}")]
    Unavailable(String),
}

pub fn parse_context_json(raw: &str) -> Result<QuizContext, ContextError> {
    let ctx: QuizContext = serde_json::from_str(raw)?;
    validate_quiz(&ctx.quiz_data);
    Ok(ctx)
}

pub fn parse_context_yaml(raw: &str) -> Result<QuizContext, ContextError> {
    let ctx: QuizContext = serde_yaml::from_str(raw)?;
    validate_quiz(&ctx.quiz_data);
    Ok(ctx)
}

/// Lee un contexto de disco; `.yaml`/`.yml` como YAML y el resto como JSON.
pub fn read_context_file(path: &Path) -> Result<QuizContext, ContextError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContextError::Io {
        path: path.display().to_string(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_context_yaml(&raw),
        _ => parse_context_json(&raw),
    }
}

/// Carga el quiz de ejemplo embebido
pub fn demo_context() -> Result<QuizContext, ContextError> {
    parse_context_yaml(include_str!("data/demo_quiz.yaml"))
}

/// Avisa (sin fallar) de las preguntas que no tienen exactamente una opción
/// correcta o que repiten texto de opción.
pub fn validate_quiz(questions: &[Question]) -> usize {
    let mut problems = 0;
    for (i, q) in questions.iter().enumerate() {
        let correct = q.options.iter().filter(|o| o.is_correct).count();
        if correct != 1 {
            log::warn!("pregunta {i}: {correct} opciones correctas (se esperaba 1)");
            problems += 1;
        }
        let mut seen = HashSet::new();
        if q.options.iter().any(|o| !seen.insert(o.text.as_str())) {
            log::warn!("pregunta {i}: textos de opción repetidos");
            problems += 1;
        }
    }
    problems
}

/// Reconstruye la selección previa a partir de los índices que guarda el
/// servidor.
pub fn hydrate_selections(ctx: &QuizContext) -> SelectionMap {
    let mut selections = SelectionMap::new();
    for (key, value) in &ctx.user_answers {
        let Some(option_idx) = value else {
            continue;
        };
        let Ok(q_idx) = key.parse::<usize>() else {
            log::warn!("respuesta previa con clave no numérica: {key:?}");
            continue;
        };
        let Some(question) = ctx.quiz_data.get(q_idx) else {
            log::warn!("respuesta previa para pregunta inexistente: {q_idx}");
            continue;
        };
        match question.options.get(*option_idx) {
            Some(option) => selections.insert(q_idx, option.text.clone()),
            None => log::warn!("pregunta {q_idx}: opción {option_idx} fuera de rango"),
        }
    }
    selections
}

#[cfg(test)]
mod tests {
    use super::*;

    const CTX: &str = r#"{
        "quiz_data": [
            {"question": "Capital of France?", "answerOptions": [
                {"text": "Paris", "isCorrect": true, "rationale": "r"},
                {"text": "Lyon", "isCorrect": false, "rationale": "r"}
            ]},
            {"question": "Answer?", "answerOptions": [
                {"text": "41", "isCorrect": false, "rationale": "r"},
                {"text": "42", "isCorrect": true, "rationale": "r"}
            ]}
        ],
        "user_answers": {"0": 0, "1": null, "7": 1, "x": 0},
        "is_submitted": true,
        "score": 1
    }"#;

    #[test]
    fn demo_quiz_is_valid() {
        let ctx = demo_context().unwrap();
        assert!(ctx.has_quiz());
        assert_eq!(validate_quiz(&ctx.quiz_data), 0);
        assert!(!ctx.is_submitted);
    }

    #[test]
    fn hydrate_skips_null_and_unknown_entries() {
        let ctx = parse_context_json(CTX).unwrap();
        let sel = hydrate_selections(&ctx);
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.get(0), Some("Paris"));
        assert_eq!(sel.get(1), None);
    }

    #[test]
    fn hydrate_skips_out_of_range_option() {
        let mut ctx = parse_context_json(CTX).unwrap();
        ctx.user_answers.insert("1".into(), Some(9));
        let sel = hydrate_selections(&ctx);
        assert_eq!(sel.get(1), None);
    }

    #[test]
    fn validate_flags_missing_correct_option() {
        let mut ctx = parse_context_json(CTX).unwrap();
        ctx.quiz_data[1].options[1].is_correct = false;
        assert_eq!(validate_quiz(&ctx.quiz_data), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_context_json("{\"quiz_data\": 3}"),
            Err(ContextError::Json(_))
        ));
    }
}
