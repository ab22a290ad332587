// ==========================================
// Logistica ASN - terminal prompter
// ==========================================

use crate::prompt::error::{PromptError, PromptResult};
use crate::prompt::Prompter;
use std::io::{self, BufRead, Write};

/// Prompter on stdin / stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> PromptResult<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            // stdin closed
            return Err(PromptError::Cancelled);
        }
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn show(&mut self, message: &str) {
        println!("{}", message);
    }

    fn clear(&mut self) {
        print!("\x1B[2J\x1B[1;1H");
        let _ = io::stdout().flush();
    }
}
