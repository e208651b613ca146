//! Mock user input for testing

use super::input::{InputError, Result, UserInput};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Text(String),
    Confirm(bool),
    /// Select the first item whose label starts with this text
    Choose(String),
    /// Simulate ESC
    Cancel,
}

/// Input that replays predetermined answers in order
///
/// Running out of answers behaves like ESC. Asking for the wrong kind of
/// answer is reported as `InputError::Invalid`.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedInput {
    /// Create a new script
    #[must_use]
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every prompt shown so far
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl UserInput for ScriptedInput {
    fn prompt_text(
        &self,
        prompt: &str,
        _default: Option<&str>,
        _allow_empty: bool,
    ) -> Result<Option<String>> {
        match self.next(prompt) {
            Some(Answer::Text(text)) => Ok(Some(text)),
            None | Some(Answer::Cancel) => Ok(None),
            Some(other) => Err(InputError::Invalid(format!(
                "expected text for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn prompt_confirm(&self, prompt: &str, _default: bool) -> Result<Option<bool>> {
        match self.next(prompt) {
            Some(Answer::Confirm(yes)) => Ok(Some(yes)),
            None | Some(Answer::Cancel) => Ok(None),
            Some(other) => Err(InputError::Invalid(format!(
                "expected confirmation for '{prompt}', got {other:?}"
            ))),
        }
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        match self.next(prompt) {
            Some(Answer::Choose(label)) => items
                .iter()
                .position(|item| item.starts_with(&label))
                .map(Some)
                .ok_or_else(|| InputError::Invalid(format!("'{label}' not offered in {items:?}"))),
            None | Some(Answer::Cancel) => Ok(None),
            Some(other) => Err(InputError::Invalid(format!(
                "expected selection for '{prompt}', got {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let input = ScriptedInput::new(vec![
            Answer::Text("rust".into()),
            Answer::Choose("Next".into()),
            Answer::Confirm(true),
        ]);
        let items = vec!["Previous page".to_string(), "Next page".to_string()];

        assert_eq!(input.prompt_text("query", None, true).unwrap(), Some("rust".into()));
        assert_eq!(input.prompt_select("action", &items, None).unwrap(), Some(1));
        assert_eq!(input.prompt_confirm("sure?", false).unwrap(), Some(true));
        assert_eq!(input.prompts(), vec!["query", "action", "sure?"]);
    }

    #[test]
    fn test_exhausted_script_cancels() {
        let input = ScriptedInput::default();
        assert_eq!(input.prompt_text("query", None, true).unwrap(), None);
    }

    #[test]
    fn test_wrong_answer_kind() {
        let input = ScriptedInput::new(vec![Answer::Confirm(true)]);
        assert!(matches!(
            input.prompt_text("query", None, true),
            Err(InputError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_choice() {
        let input = ScriptedInput::new(vec![Answer::Choose("Quit".into())]);
        let items = vec!["Retry".to_string()];
        assert!(input.prompt_select("action", &items, None).is_err());
    }
}
