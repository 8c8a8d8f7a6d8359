use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing_subscriber::EnvFilter;

use dsa_application::{CommandOutcome, SessionController, SolutionSubmitter};
use dsa_core::command::{COMMAND_PREFIX, builtin_commands, help_text};
use dsa_core::{Command, SolutionStore, SubmissionMode};
use dsa_infrastructure::{ConfigService, FileSolutionStore};
use dsa_interaction::{LeetCodeProblemFetcher, OpenAiConnector};

/// Rustyline helper: completes and hints `dsa-*` commands and submit modes.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
    modes: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: builtin_commands()
                .iter()
                .map(|cmd| cmd.name.to_string())
                .collect(),
            modes: SubmissionMode::command_modes()
                .map(|mode| mode.to_string())
                .collect(),
        }
    }

    /// Candidates for the word under the cursor: command names, or modes after `dsa-submit`.
    fn candidates<'a>(&'a self, line: &str) -> (usize, Vec<&'a String>) {
        if let Some(partial) = line.strip_prefix("dsa-submit ") {
            if partial.contains(' ') {
                return (0, vec![]);
            }
            let start = line.len() - partial.len();
            let modes = self
                .modes
                .iter()
                .filter(|mode| mode.starts_with(partial))
                .collect();
            return (start, modes);
        }

        if line.starts_with(COMMAND_PREFIX) && !line.contains(' ') {
            let commands = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .collect();
            return (0, commands);
        }

        (0, vec![])
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate.clone(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with(COMMAND_PREFIX) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, candidates) = self.candidates(line);
        let typed = line.len() - start;
        candidates
            .into_iter()
            .find(|candidate| candidate.len() > typed)
            .map(|candidate| candidate[typed..].to_string())
    }
}

impl Validator for CliHelper {}

/// Logs go to stderr so they never interleave with REPL output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Shown before a command that is about to do network work.
///
/// Only commands that will pass the controller's checks get a banner, so a
/// rejected line goes straight to its error.
fn progress_banner(line: &str, session_active: bool) -> Option<&'static str> {
    match Command::parse(line) {
        Ok(Some(Command::Submit { mode }))
            if session_active && SubmissionMode::parse_command_mode(&mode).is_ok() =>
        {
            Some("🤖 Sending request to AI for analysis... (this may take a moment)")
        }
        Ok(Some(Command::Init { .. })) if !session_active => Some("--- Starting new session ---"),
        _ => None,
    }
}

fn print_outcome(outcome: CommandOutcome) {
    match outcome {
        CommandOutcome::NoOp => {}
        CommandOutcome::Help(text) => println!("\n{}", text.bright_black()),
        CommandOutcome::SessionStarted { title } => {
            println!(
                "{}",
                format!(
                    "✅ Session started for '{}'. You can now edit the file in the problems directory.",
                    title
                )
                .bright_green()
            );
            println!(
                "{}",
                "When you are ready, use 'dsa-submit <mode>' to analyze your code.".bright_black()
            );
        }
        CommandOutcome::Verification(text) => {
            println!("{}", "--- AI Verification Result ---".bright_magenta());
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
            println!("{}", "------------------------------".bright_magenta());
        }
        CommandOutcome::ArtifactSaved(path) => {
            println!(
                "{}",
                format!("✅ AI response saved successfully to {}", path.display()).bright_green()
            );
        }
        CommandOutcome::SessionEnded => {
            println!("{}", "✅ Session ended. You can now start a new one.".bright_green());
        }
        CommandOutcome::Failed(err) => {
            eprintln!("{}", format!("❌ {}", err).red());
        }
    }
}

/// The main entry point for the DSA agent REPL.
///
/// Commands are handled one at a time: each one, including the model round
/// trip of `dsa-submit`, completes before the next line is read.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    // ===== Backend Initialization =====
    let config = ConfigService::new().load();
    tracing::info!("[Bootstrap] Problems directory: {}", config.problems_dir.display());
    if config.api_key.is_none() {
        tracing::warn!(
            "[Bootstrap] No OpenAI API key configured; dsa-submit will fail until one is set"
        );
    }

    let store: Arc<dyn SolutionStore> =
        Arc::new(FileSolutionStore::new(config.problems_dir.clone()));
    let fetcher = Arc::new(LeetCodeProblemFetcher::new(
        store.clone(),
        config.request_timeout,
    )?);
    let connector = Arc::new(OpenAiConnector::from_config(&config));
    let submitter =
        SolutionSubmitter::new(connector, store).with_timeout(config.request_timeout);
    let mut controller = SessionController::new(fetcher, submitter);

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "✅ DSA AI AGENT is Ready.".bright_magenta().bold());
    println!("\n{}", help_text().bright_black());

    // ===== Main REPL Loop =====
    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(trimmed);

                if let Some(banner) = progress_banner(trimmed, controller.state().is_active()) {
                    println!("{}", banner.bright_black());
                }

                let outcome = controller.handle_line(trimmed).await;
                print_outcome(outcome);
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(candidates: Vec<&String>) -> Vec<&str> {
        candidates.into_iter().map(String::as_str).collect()
    }

    #[test]
    fn test_completes_command_names() {
        let helper = CliHelper::new();
        let (start, candidates) = helper.candidates("dsa-s");
        assert_eq!(start, 0);
        assert_eq!(names(candidates), vec!["dsa-submit"]);
    }

    #[test]
    fn test_completes_modes_after_submit() {
        let helper = CliHelper::new();
        let (start, candidates) = helper.candidates("dsa-submit f");
        assert_eq!(start, "dsa-submit ".len());
        assert_eq!(names(candidates), vec!["fix"]);

        let (_, all) = helper.candidates("dsa-submit ");
        assert_eq!(names(all), vec!["check", "help", "fix"]);
    }

    #[test]
    fn test_submit_banner_only_for_a_valid_mode_in_a_session() {
        assert!(progress_banner("dsa-submit check", true).is_some());
        assert!(progress_banner("dsa-submit fix", true).is_some());
        assert!(progress_banner("dsa-submit optimize", true).is_none());
        assert!(progress_banner("dsa-submit bogus", true).is_none());
        assert!(progress_banner("dsa-submit check", false).is_none());
        assert!(progress_banner("dsa-submit", true).is_none());
    }

    #[test]
    fn test_init_banner_only_when_idle() {
        assert!(progress_banner("dsa-init two-sum python", false).is_some());
        assert!(progress_banner("dsa-init two-sum python", true).is_none());
        assert!(progress_banner("dsa-init two-sum", false).is_none());
        assert!(progress_banner("dsa-exit", false).is_none());
    }

    #[test]
    fn test_no_candidates_for_free_text() {
        let helper = CliHelper::new();
        assert!(helper.candidates("hello").1.is_empty());
        assert!(helper.candidates("dsa-init two-sum").1.is_empty());
    }
}
