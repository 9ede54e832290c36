use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnswerOption {
    pub text: String, // único dentro de su pregunta
    #[serde(rename = "isCorrect", default)]
    pub is_correct: bool,
    #[serde(default)]
    pub rationale: String, // sólo se muestra tras enviar
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(rename = "answerOptions", default)]
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct)
    }

    pub fn option_index(&self, text: &str) -> Option<usize> {
        self.options.iter().position(|o| o.text == text)
    }
}

/// Datos que la página anfitriona inyecta al cargar.
///
/// Todo es opcional: si falta el bloque entero el quiz queda vacío y la vista
/// no pinta nada.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizContext {
    #[serde(default)]
    pub quiz_data: Vec<Question>,
    /// "índice de pregunta" -> índice de opción elegida (`null` = sin responder)
    #[serde(default)]
    pub user_answers: BTreeMap<String, Option<usize>>,
    #[serde(default)]
    pub is_submitted: bool,
    #[serde(default)]
    pub score: Option<u32>,
}

impl QuizContext {
    pub fn has_quiz(&self) -> bool {
        !self.quiz_data.is_empty()
    }
}

/// Índice de pregunta -> texto de la opción elegida.
///
/// Se serializa como objeto JSON con claves decimales (`{"0": "Paris"}`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SelectionMap(BTreeMap<usize, String>);

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_index: usize, option_text: impl Into<String>) {
        self.0.insert(question_index, option_text.into());
    }

    pub fn get(&self, question_index: usize) -> Option<&str> {
        self.0.get(&question_index).map(String::as_str)
    }

    pub fn is_selected(&self, question_index: usize, option_text: &str) -> bool {
        self.get(question_index) == Some(option_text)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl FromIterator<(usize, String)> for SelectionMap {
    fn from_iter<T: IntoIterator<Item = (usize, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Empty,
    Quiz,
    Results,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Empty
    }
}
