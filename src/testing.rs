//! Scripted fakes standing in for the git CLI and the interactive prompts

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use crate::prompt::{Prompter, TrackChoice};
use crate::runner::{CmdOutcome, GitRunner};

/// [`GitRunner`] that replays canned outcomes keyed on the exact git
/// argument vector and records every invocation. Unscripted invocations
/// succeed with empty output, matching git's quiet happy path.
pub struct ScriptRunner {
    rules: Vec<(Vec<String>, CmdOutcome)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptRunner {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn on(mut self, args: &[&str], success: bool, output: &str) -> Self {
        self.rules.push((
            to_owned(args),
            CmdOutcome {
                success,
                output: output.to_string(),
            },
        ));
        self
    }

    /// Number of recorded invocations exactly matching `args`.
    pub fn count(&self, args: &[&str]) -> usize {
        let wanted = to_owned(args);
        self.calls.borrow().iter().filter(|c| **c == wanted).count()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl GitRunner for ScriptRunner {
    fn run(&self, _repo: &Path, args: &[&str]) -> CmdOutcome {
        let args = to_owned(args);
        self.calls.borrow_mut().push(args.clone());
        for (rule, outcome) in &self.rules {
            if *rule == args {
                return outcome.clone();
            }
        }
        CmdOutcome {
            success: true,
            output: String::new(),
        }
    }
}

fn to_owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// [`Prompter`] with fixed answers, recording every question asked.
pub struct ScriptPrompter {
    queued: RefCell<VecDeque<bool>>,
    default_answer: bool,
    choice: TrackChoice,
    asked: RefCell<Vec<String>>,
}

impl ScriptPrompter {
    pub fn answering(default_answer: bool) -> Self {
        Self {
            queued: RefCell::new(VecDeque::new()),
            default_answer,
            choice: TrackChoice::None,
            asked: RefCell::new(Vec::new()),
        }
    }

    pub fn with_choice(mut self, choice: TrackChoice) -> Self {
        self.choice = choice;
        self
    }

    /// Queue answers consumed before falling back to the default.
    pub fn queue(self, answers: &[bool]) -> Self {
        self.queued.borrow_mut().extend(answers.iter().copied());
        self
    }

    pub fn questions(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptPrompter {
    fn confirm(&self, question: &str) -> bool {
        self.asked.borrow_mut().push(question.to_string());
        self.queued
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.default_answer)
    }

    fn choose_tracking(&self, question: &str) -> TrackChoice {
        self.asked.borrow_mut().push(question.to_string());
        self.choice
    }
}
