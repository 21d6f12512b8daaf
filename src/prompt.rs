//! Interactive confirmation prompts
//!
//! Batch logic takes a [`Prompter`] instead of touching stdin directly,
//! so it can run against scripted answers in tests.

use std::io::{self, Write};

/// Decision for creating tracking branches for remote-only branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackChoice {
    /// Create every tracking branch without further questions.
    All,
    /// Ask again for each branch individually.
    AskEach,
    /// Create none.
    None,
}

pub trait Prompter {
    /// Ask a yes/no question; `true` means yes.
    fn confirm(&self, question: &str) -> bool;

    /// Ask the three-way tracking-branch question (y/n/all).
    fn choose_tracking(&self, question: &str) -> TrackChoice;
}

/// [`Prompter`] reading answers from stdin.
pub struct StdinPrompter;

impl StdinPrompter {
    fn read_answer(question: &str) -> String {
        print!("{question} ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return String::new();
        }
        input.trim().to_lowercase()
    }
}

impl Prompter for StdinPrompter {
    fn confirm(&self, question: &str) -> bool {
        Self::read_answer(question) == "y"
    }

    fn choose_tracking(&self, question: &str) -> TrackChoice {
        match Self::read_answer(question).as_str() {
            "all" => TrackChoice::All,
            "y" => TrackChoice::AskEach,
            _ => TrackChoice::None,
        }
    }
}
