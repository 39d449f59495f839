use crate::app::formatter::OutputGenerator;
use crate::app::models::Candidate;
use crate::app::sink::Sink;
use std::io::{self, BufRead, Write};

/// Source of answers to confirmation prompts.
pub trait DecisionProvider {
    /// Returns the raw response line, or `None` if no answer can be read.
    fn ask(&mut self, prompt: &str) -> Option<String>;
}

/// Prompts on stdout and reads one line from stdin.
pub struct StdinDecider;

impl DecisionProvider for StdinDecider {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        if let Err(e) = io::stdout().flush() {
            log::warn!("Failed to flush prompt: {}", e);
        }

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(e) => {
                log::warn!("Failed to read confirmation: {}", e);
                None
            }
        }
    }
}

/// Replays queued answers; an exhausted queue reads as end of input.
#[cfg(test)]
pub struct ScriptedDecider {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedDecider {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|s| s.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

#[cfg(test)]
impl DecisionProvider for ScriptedDecider {
    fn ask(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front()
    }
}

pub const PROMPT: &str = "Proceed with deletion? (y/n): ";

/// Safe-mode gate: previews at most `limit` candidates and asks once for the whole batch.
pub fn confirm(
    heading: &str,
    candidates: &[Candidate],
    limit: usize,
    decider: &mut dyn DecisionProvider,
    sink: &mut dyn Sink,
) -> bool {
    for line in OutputGenerator::preview(heading, candidates, limit) {
        sink.notice(&line);
    }

    let answer = decider.ask(PROMPT);
    let proceed = answer
        .as_deref()
        .is_some_and(|a| a.trim().eq_ignore_ascii_case("y"));

    // The decider has already shown the prompt; only the log file gets the exchange.
    sink.record(&format!(
        "{}{}",
        PROMPT,
        answer.as_deref().map(str::trim).unwrap_or("<no answer>")
    ));
    if !proceed {
        sink.notice(&format!("Skipped {} item(s).", candidates.len()));
    }
    proceed
}
