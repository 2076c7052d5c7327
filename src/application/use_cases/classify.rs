use serde_json::Value;

use crate::domain::ClarificationQuestion;

/// Category assigned to questions the model returned without one.
pub const DEFAULT_CATEGORY: &str = "general";

/// System prompt instructing the model to judge ambiguity and reply with a
/// strict JSON object.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = "\
Judge whether the user's question is ambiguous and reply with a JSON object of \
exactly this shape:
{
  \"needs_clarification\": true or false,
  \"questions\": [
    {
      \"id\": <sequential number starting at 1>,
      \"question\": \"<the follow-up question to ask>\",
      \"category\": \"<category of the question>\"
    }
  ]
}

Set needs_clarification to true when follow-up questions are required, false \
otherwise. Include concrete questions in the array only when \
needs_clarification is true; return an empty array [] when there are none.";

/// The classifier's verdict after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub needs_clarification: bool,
    pub questions: Vec<ClarificationQuestion>,
}

impl Classification {
    /// The safe fallback: answer directly, ask nothing.
    pub fn none() -> Self {
        Self {
            needs_clarification: false,
            questions: Vec::new(),
        }
    }

    /// True only when a clarification round should be surfaced: the flag is
    /// set AND at least one question survived normalization.
    pub fn should_clarify(&self) -> bool {
        self.needs_clarification && !self.questions.is_empty()
    }
}

/// Tagged result of shape-checking the classifier's output.
///
/// The fallback-to-direct-answer policy is applied by the caller at one site;
/// this function only reports what it found.
#[derive(Debug)]
pub enum Verdict {
    Valid(Classification),
    Invalid(String),
}

/// Parse the raw completion text into a [`Verdict`].
///
/// The model is instructed to return a bare JSON object; any text outside the
/// outermost `{…}` is ignored to be resilient to minor formatting deviations
/// such as code fences.
pub fn parse_classification(text: &str) -> Verdict {
    let start = text.find('{');
    let end = text.rfind('}');

    let (Some(s), Some(e)) = (start, end) else {
        return Verdict::Invalid("no JSON object in classifier output".to_string());
    };
    // A lone `}` before the first `{` is not an object either.
    if e < s {
        return Verdict::Invalid("no JSON object in classifier output".to_string());
    }

    let value: Value = match serde_json::from_str(&text[s..=e]) {
        Ok(v) => v,
        Err(err) => {
            return Verdict::Invalid(format!("classifier output is not valid JSON: {err}"));
        }
    };

    let Some(needs_clarification) = value.get("needs_clarification").and_then(Value::as_bool)
    else {
        return Verdict::Invalid("needs_clarification is missing or not a boolean".to_string());
    };

    let Some(raw_questions) = value.get("questions").and_then(Value::as_array) else {
        return Verdict::Invalid("questions is missing or not an array".to_string());
    };

    Verdict::Valid(Classification {
        needs_clarification,
        questions: normalize_questions(raw_questions),
    })
}

/// Normalize raw question entries: `id` from the payload or the 1-based
/// position, `category` defaulted when absent, entries without question text
/// dropped.
fn normalize_questions(raw: &[Value]) -> Vec<ClarificationQuestion> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let question = entry.get("question").and_then(Value::as_str)?.trim();
            if question.is_empty() {
                return None;
            }

            let id = entry
                .get("id")
                .and_then(Value::as_u64)
                .and_then(|id| u32::try_from(id).ok())
                .unwrap_or(index as u32 + 1);

            let category = entry
                .get("category")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(DEFAULT_CATEGORY);

            Some(ClarificationQuestion::new(id, question, category))
        })
        .collect()
}
