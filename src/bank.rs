use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open question bank: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed question bank: {0}")]
    Csv(#[from] csv::Error),
    #[error("question {id}: correct answer {value:?} does not resolve to one of 1-4")]
    InvalidCorrectAnswer { id: String, value: String },
    #[error("question {id}: option {index} is empty but marked correct")]
    EmptyCorrectOption { id: String, index: u8 },
}

/// Row shape as stored in the dataset. The `correct` column holds a numeric
/// string that may carry a fractional suffix ("3.0").
#[derive(Debug, Deserialize)]
struct RawQuestion {
    period: String,
    id: String,
    text: String,
    option_1: String,
    option_2: String,
    option_3: String,
    option_4: String,
    correct: String,
    category: String,
    explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub options: [String; 4],
    /// 1-based index into `options`, always in 1..=4.
    pub correct_index: u8,
    pub category: String,
    pub period: String,
    pub explanation: String,
}

/// Parses the stored correct-answer value: float parse, truncate toward
/// zero, then range check. "3", "3.0" and " 3.0 " all resolve to 3.
fn normalize_correct(value: &str) -> Option<u8> {
    let parsed: f64 = value.trim().parse().ok()?;
    let truncated = parsed as i64;
    if (1..=4).contains(&truncated) {
        Some(truncated as u8)
    } else {
        None
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = LoadError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let correct_index =
            normalize_correct(&raw.correct).ok_or_else(|| LoadError::InvalidCorrectAnswer {
                id: raw.id.clone(),
                value: raw.correct.clone(),
            })?;

        let options = [raw.option_1, raw.option_2, raw.option_3, raw.option_4];
        if options[correct_index as usize - 1].is_empty() {
            return Err(LoadError::EmptyCorrectOption {
                id: raw.id,
                index: correct_index,
            });
        }

        Ok(Question {
            id: raw.id,
            text: raw.text,
            options,
            correct_index,
            category: raw.category,
            period: raw.period,
            explanation: raw.explanation,
        })
    }
}

/// Immutable in-memory question table, loaded once per process.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::load_from_reader(file)
    }

    /// Loads from any CSV source with headers. The load is all-or-nothing:
    /// the first malformed row or invalid answer key fails the whole bank.
    pub fn load_from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut questions = Vec::new();
        let mut csv_reader = csv::Reader::from_reader(reader);
        for row in csv_reader.deserialize() {
            let raw: RawQuestion = row?;
            questions.push(Question::try_from(raw)?);
        }
        Ok(QuestionBank { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
