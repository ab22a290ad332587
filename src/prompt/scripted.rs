// ==========================================
// Logistica ASN - scripted prompter
// ==========================================
// Feeds prepared answers and records everything shown.
// Used by tests to drive whole client processes.
// ==========================================

use crate::prompt::error::{PromptError, PromptResult};
use crate::prompt::Prompter;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Prompts and messages shown so far, in order.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// True when some shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|l| l.contains(needle))
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> PromptResult<String> {
        self.transcript.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| PromptError::ScriptExhausted {
                prompt: prompt.to_string(),
            })
    }

    fn show(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }

    fn clear(&mut self) {}
}
