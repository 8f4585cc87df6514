//! Terminal front end — renders the registration form as a line-based prompt.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::error;
use crate::form::{FieldKind, FormField, FormPhase};
use crate::submit::{Registrar, SubmissionResult};

const TITLE: &str = "Extracurricular Registration";
const SUBTITLE: &str = "Fill in the form below to join the extracurricular of your choice.";
const HINT: &str =
    "Fields marked * are required. Press Enter to keep the current value, '-' to clear it.";
const WHY_JOIN_TITLE: &str = "Why join?";
const WHY_JOIN: [&str; 4] = [
    "Develop your talents and interests",
    "Take part in competitions and school events",
    "Make friends and gain new experiences",
    "Build a portfolio for university admission",
];
const HIGHLIGHT: &str = "Schedules and selection details are posted on the school notice board, \
    or ask the supervising teacher of each extracurricular.";
const LONG_TEXT_HINT: &str = "finish with an empty line";
const SUBMIT_LABEL: &str = "Register now";
const SUBMITTING_LABEL: &str = "Saving...";
const SUCCESS_TITLE: &str = "Registration successful";
const SUCCESS_BODY: &str =
    "Thank you for registering. We will contact you with further information.";
const REGISTER_AGAIN: &str = "Register again? [y/N]";

const IN_FLIGHT_POLL: Duration = Duration::from_millis(100);

/// Interactive form over any line-based input and text output.
pub struct FormPrompt<R, W> {
    registrar: Arc<Registrar>,
    lines: Lines<R>,
    out: W,
}

impl<R, W> FormPrompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(registrar: Arc<Registrar>, input: R, out: W) -> Self {
        Self {
            registrar,
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until the input ends or the user declines to register again.
    pub async fn run(&mut self) -> error::Result<()> {
        self.say(TITLE).await?;
        self.say(SUBTITLE).await?;
        self.say("").await?;
        self.say(WHY_JOIN_TITLE).await?;
        for reason in WHY_JOIN {
            self.say(&format!("  - {reason}")).await?;
        }
        self.say(HIGHLIGHT).await?;

        loop {
            let store = self.registrar.snapshot().await;
            let phase = store.phase();

            if !phase.is_editable() {
                if phase == FormPhase::Submitting {
                    // Someone else holds the registrar and is mid-request.
                    tokio::time::sleep(IN_FLIGHT_POLL).await;
                    continue;
                }
                self.say("").await?;
                self.say(SUCCESS_TITLE).await?;
                self.say(SUCCESS_BODY).await?;
                self.say(REGISTER_AGAIN).await?;
                match self.next_line().await? {
                    Some(answer) if is_yes(&answer) => {
                        self.registrar.reset().await;
                        continue;
                    }
                    _ => return Ok(()),
                }
            }

            self.say("").await?;
            if let Some(error) = store.error() {
                self.say(&format!("! {error}")).await?;
            }
            self.say(HINT).await?;

            for field in FormField::ALL {
                let current = store.get(field).to_string();
                let Some(value) = self.prompt_field(field, &current).await? else {
                    return Ok(());
                };
                if value != current {
                    self.registrar.set_field(field, value).await;
                }
            }

            self.say(&format!("[ {SUBMIT_LABEL} ]")).await?;
            self.say(SUBMITTING_LABEL).await?;
            match self.registrar.submit().await {
                SubmissionResult::Saved | SubmissionResult::Failed { .. } => {}
                other => tracing::debug!(result = ?other, "Submit had no effect"),
            }
        }
    }

    /// Ask for one field until the answer is acceptable. `None` on end of input.
    async fn prompt_field(
        &mut self,
        field: FormField,
        current: &str,
    ) -> io::Result<Option<String>> {
        loop {
            self.render_field(field, current).await?;

            let Some(line) = self.next_line().await? else {
                return Ok(None);
            };
            let trimmed = line.trim();

            let value = if trimmed.is_empty() {
                current.to_string()
            } else if trimmed == "-" {
                String::new()
            } else if let FieldKind::Choice(options) = field.kind() {
                match resolve_choice(options, trimmed) {
                    Some(option) => option.to_string(),
                    None => {
                        self.say("  Pick one of the listed options.").await?;
                        continue;
                    }
                }
            } else if field.kind() == FieldKind::LongText {
                match self.read_paragraph(line).await? {
                    Some(text) => text,
                    None => return Ok(None),
                }
            } else {
                line
            };

            if field.kind() == FieldKind::Email && !value.is_empty() && !value.contains('@') {
                self.say("  Enter a valid email address.").await?;
                continue;
            }
            if field.is_required() && value.is_empty() {
                self.say("  This field is required.").await?;
                continue;
            }
            return Ok(Some(value));
        }
    }

    /// Collect lines after `first` until an empty line. `None` on end of input.
    async fn read_paragraph(&mut self, first: String) -> io::Result<Option<String>> {
        let mut text = first;
        loop {
            match self.next_line().await? {
                Some(line) if line.trim().is_empty() => return Ok(Some(text)),
                Some(line) => {
                    text.push('\n');
                    text.push_str(&line);
                }
                None => return Ok(None),
            }
        }
    }

    async fn render_field(&mut self, field: FormField, current: &str) -> io::Result<()> {
        let marker = if field.is_required() { "*" } else { "" };
        self.say(&format!("{}{marker}", field.label())).await?;

        if let FieldKind::Choice(options) = field.kind() {
            for (i, option) in options.iter().enumerate() {
                self.say(&format!("  {}) {option}", i + 1)).await?;
            }
        }

        let mut hint = if !current.is_empty() {
            format!("[{current}]")
        } else {
            match field.placeholder() {
                Some(placeholder) => format!("({placeholder})"),
                None => String::new(),
            }
        };
        if field.kind() == FieldKind::LongText {
            hint.push_str(&format!(" ({LONG_TEXT_HINT})"));
        }
        self.out.write_all(format!("{hint}> ").as_bytes()).await?;
        self.out.flush().await
    }

    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Ok(self
            .lines
            .next_line()
            .await?
            .map(|line| line.trim_end_matches('\r').to_string()))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await
    }
}

/// Accept a 1-based option number or an option name (case-insensitive).
fn resolve_choice(options: &'static [&'static str], input: &str) -> Option<&'static str> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input))
        .copied()
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
