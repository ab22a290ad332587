// ==========================================
// Logistica ASN - operator interaction
// ==========================================
// Prompter: raw line I/O (read_line / show / clear)
// Provided methods: validated, retrying prompts
// Implementations: TerminalPrompter (stdin/stdout), ScriptedPrompter
// ==========================================

pub mod error;
pub mod scripted;
pub mod terminal;

pub use error::{PromptError, PromptResult};
pub use scripted::ScriptedPrompter;
pub use terminal::TerminalPrompter;

use crate::domain::types::Answer;
use crate::i18n::t;
use crate::importer::text_cleaner::parse_number;

/// Result of a single-choice menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 0-based index of the chosen entry
    Item(usize),
    Back,
    Exit,
}

/// Result of a multi-choice menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSelection {
    /// 0-based indices, ascending, without duplicates
    Items(Vec<usize>),
    Back,
    Exit,
}

// ==========================================
// Prompter trait
// ==========================================
pub trait Prompter {
    /// Shows `prompt` and reads one line (without the trailing newline).
    fn read_line(&mut self, prompt: &str) -> PromptResult<String>;

    /// Shows a message line.
    fn show(&mut self, message: &str);

    /// Clears the screen.
    fn clear(&mut self);

    /// Number without spaces; retried until valid.
    fn prompt_number(&mut self, message: &str) -> PromptResult<f64> {
        loop {
            let value = self.prompt_no_spaces(message)?;
            match parse_number(&value) {
                Some(n) => return Ok(n),
                None => self.show(&t("prompt.invalid_number")),
            }
        }
    }

    /// Whole number without spaces; retried until valid.
    fn prompt_integer(&mut self, message: &str) -> PromptResult<i64> {
        loop {
            let value = self.prompt_no_spaces(message)?;
            match value.parse::<i64>() {
                Ok(n) => return Ok(n),
                Err(_) => self.show(&t("prompt.invalid_integer")),
            }
        }
    }

    /// Free text, trimmed. May be empty.
    fn prompt_text(&mut self, message: &str) -> PromptResult<String> {
        Ok(self.read_line(message)?.trim().to_string())
    }

    /// Non-empty text without spaces; retried until valid.
    fn prompt_no_spaces(&mut self, message: &str) -> PromptResult<String> {
        loop {
            let value = self.prompt_text(message)?;
            if value.is_empty() || value.contains(char::is_whitespace) {
                self.show(&t("prompt.no_spaces"));
                continue;
            }
            return Ok(value);
        }
    }

    /// `s` / `n` question; retried until one of them is typed.
    fn prompt_yes_no(&mut self, message: &str) -> PromptResult<bool> {
        let full = format!("{} (s/n): ", message);
        loop {
            match self.prompt_text(&full)?.to_lowercase().as_str() {
                "s" | "si" | "sí" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.show(&t("prompt.invalid_option")),
            }
        }
    }

    /// Sí / No / Salir question.
    fn prompt_option(&mut self, message: &str) -> PromptResult<Answer> {
        self.show(message);
        self.show(&t("prompt.option_list"));
        loop {
            let answer = self.prompt_text(&t("prompt.option_input"))?.to_lowercase();
            match answer.as_str() {
                "1" | "s" | "si" | "sí" => return Ok(Answer::Yes),
                "2" | "n" | "no" => return Ok(Answer::No),
                "3" | "x" | "salir" => return Ok(Answer::Exit),
                _ => self.show(&t("prompt.invalid_option")),
            }
        }
    }

    /// Numbered menu (1-based); `0`/`v` goes back, `x` exits.
    fn prompt_choice(&mut self, message: &str, choices: &[String]) -> PromptResult<Selection> {
        self.show(message);
        for (i, choice) in choices.iter().enumerate() {
            self.show(&format!("{}. {}", i + 1, choice));
        }
        loop {
            let answer = self.prompt_text(&t("prompt.choice_input"))?.to_lowercase();
            match answer.as_str() {
                "0" | "v" => return Ok(Selection::Back),
                "x" => return Ok(Selection::Exit),
                _ => {}
            }
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= choices.len() => return Ok(Selection::Item(n - 1)),
                _ => self.show(&t("prompt.invalid_option")),
            }
        }
    }

    /// Numbered multi-select: "1,3 5-7"; `0`/`v` goes back, `x` exits.
    ///
    /// Empty or invalid selections are retried.
    fn prompt_multi_choice(
        &mut self,
        message: &str,
        choices: &[String],
    ) -> PromptResult<MultiSelection> {
        self.show(message);
        for (i, choice) in choices.iter().enumerate() {
            self.show(&format!("{}. {}", i + 1, choice));
        }
        loop {
            let answer = self.prompt_text(&t("prompt.multi_choice_input"))?.to_lowercase();
            match answer.as_str() {
                "0" | "v" => return Ok(MultiSelection::Back),
                "x" => return Ok(MultiSelection::Exit),
                "" => {
                    self.show(&t("prompt.select_at_least_one"));
                    continue;
                }
                _ => {}
            }
            match parse_multi_selection(&answer, choices.len()) {
                Some(indices) => return Ok(MultiSelection::Items(indices)),
                None => self.show(&t("prompt.invalid_option")),
            }
        }
    }

    /// Waits for Enter.
    fn pause(&mut self) -> PromptResult<()> {
        self.read_line(&t("prompt.press_enter")).map(|_| ())
    }
}

/// Parses "1,3 5-7" into ascending 0-based indices.
///
/// Returns `None` when a token is not a number or range within `1..=len`.
pub fn parse_multi_selection(input: &str, len: usize) -> Option<Vec<usize>> {
    let mut picked = std::collections::BTreeSet::new();
    for token in input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
    {
        let (start, end) = match token.split_once('-') {
            Some((a, b)) => (a.trim().parse::<usize>().ok()?, b.trim().parse::<usize>().ok()?),
            None => {
                let n = token.parse::<usize>().ok()?;
                (n, n)
            }
        };
        if start == 0 || end < start || end > len {
            return None;
        }
        picked.extend((start - 1)..end);
    }
    if picked.is_empty() {
        None
    } else {
        Some(picked.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("LPN{}", i)).collect()
    }

    #[test]
    fn test_parse_multi_selection() {
        assert_eq!(parse_multi_selection("1,3", 5), Some(vec![0, 2]));
        assert_eq!(parse_multi_selection("2-4 1", 5), Some(vec![0, 1, 2, 3]));
        assert_eq!(parse_multi_selection("3,3", 5), Some(vec![2]));
        assert_eq!(parse_multi_selection("6", 5), None);
        assert_eq!(parse_multi_selection("4-2", 5), None);
        assert_eq!(parse_multi_selection("a", 5), None);
    }

    #[test]
    fn test_prompt_number_retries() {
        let mut p = ScriptedPrompter::new(["", "1 2", "abc", "12,5"]);
        assert_eq!(p.prompt_number("Peso").unwrap(), 12.5);
        assert_eq!(p.remaining(), 0);
    }

    #[test]
    fn test_prompt_yes_no_and_option() {
        let mut p = ScriptedPrompter::new(["quizás", "S", "3"]);
        assert!(p.prompt_yes_no("¿Pallets?").unwrap());
        assert_eq!(p.prompt_option("¿Más pallets?").unwrap(), Answer::Exit);
    }

    #[test]
    fn test_prompt_choice_back_and_item() {
        let mut p = ScriptedPrompter::new(["9", "2", "v", "x"]);
        assert_eq!(p.prompt_choice("Caja", &choices(3)).unwrap(), Selection::Item(1));
        assert_eq!(p.prompt_choice("Caja", &choices(3)).unwrap(), Selection::Back);
        assert_eq!(p.prompt_choice("Caja", &choices(3)).unwrap(), Selection::Exit);
    }

    #[test]
    fn test_prompt_multi_choice_requires_selection() {
        let mut p = ScriptedPrompter::new(["", "1-2"]);
        assert_eq!(
            p.prompt_multi_choice("LPNs", &choices(3)).unwrap(),
            MultiSelection::Items(vec![0, 1])
        );
    }

    #[test]
    fn test_script_exhausted() {
        let mut p = ScriptedPrompter::new(Vec::<String>::new());
        assert!(matches!(p.prompt_text("x"), Err(PromptError::ScriptExhausted { .. })));
    }
}
