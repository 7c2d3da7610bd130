use std::io::{self, Write};
use std::time::Duration;

use application::{reveal_with, run_splash, RevealOutcome, SplashOutcome};
use colored::Colorize;
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use domain::splash::phase_label;
use domain::LoanSuggestion;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const ASSISTANT_LABEL: &str = "Astra:";
const BAR_WIDTH: usize = 30;

/// Terminal rendering target for the transcript.
///
/// Any animation started through the screen is cancelled when it is dropped.
pub struct ChatScreen<W: Write> {
    out: W,
    char_delay: Duration,
    teardown: CancellationToken,
}

impl ChatScreen<io::Stdout> {
    pub fn stdout(char_delay: Duration) -> Self {
        Self::new(io::stdout(), char_delay)
    }
}

impl<W: Write> ChatScreen<W> {
    pub fn new(out: W, char_delay: Duration) -> Self {
        Self {
            out,
            char_delay,
            teardown: CancellationToken::new(),
        }
    }

    pub fn teardown_token(&self) -> CancellationToken {
        self.teardown.clone()
    }

    pub fn header(&mut self, online: bool, endpoint: &str) -> io::Result<()> {
        let status = if online {
            "● Online".green()
        } else {
            "● Offline, answering locally".yellow()
        };
        writeln!(self.out)?;
        writeln!(self.out, "{}  {}", "Astra Advisor".bold(), "AI Financial Partner".dimmed())?;
        writeln!(self.out, "{}  {}", status, endpoint.dimmed())?;
        writeln!(
            self.out,
            "{}",
            "Type a message and press Enter. End a line with \\ to keep writing. Type 'exit' to quit."
                .dimmed()
        )?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub async fn splash(&mut self) -> io::Result<SplashOutcome> {
        let token = self.teardown.child_token();
        let out = &mut self.out;
        let mut failure = None;

        let outcome = run_splash(
            |progress| {
                if failure.is_none() {
                    failure = draw_splash_frame(&mut *out, progress).err();
                }
            },
            || debug!("revealing main screen"),
            &token,
        )
        .await;

        if let Some(err) = failure {
            return Err(err);
        }
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.out.flush()?;
        Ok(outcome)
    }

    pub fn show_typing(&mut self) -> io::Result<()> {
        write!(self.out, "{} {}", ASSISTANT_LABEL.cyan().bold(), "is typing...".dimmed())?;
        self.out.flush()
    }

    pub fn clear_typing(&mut self) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.out.flush()
    }

    pub async fn reveal_assistant(&mut self, content: &str) -> io::Result<RevealOutcome> {
        write!(self.out, "{} ", ASSISTANT_LABEL.cyan().bold())?;
        self.out.flush()?;

        let token = self.teardown.child_token();
        let out = &mut self.out;
        let mut shown = 0;
        let mut failure = None;

        let outcome = reveal_with(content, self.char_delay, token, |prefix| {
            if failure.is_some() {
                return;
            }
            let delta = &prefix[shown..];
            shown = prefix.len();
            failure = out
                .write_all(delta.as_bytes())
                .and_then(|_| out.flush())
                .err();
        })
        .await;

        if let Some(err) = failure {
            return Err(err);
        }
        writeln!(self.out)?;
        writeln!(self.out)?;
        Ok(outcome)
    }

    pub fn show_assistant(&mut self, content: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", ASSISTANT_LABEL.cyan().bold(), content)?;
        self.out.flush()
    }

    pub fn show_suggestions(&mut self, suggestions: &[LoanSuggestion]) -> io::Result<()> {
        if suggestions.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{}", "Suggested options:".bold())?;
        for loan in suggestions {
            writeln!(self.out, "  • {}", describe_suggestion(loan))?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Take care. Come back anytime.".dimmed())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W
    where
        W: Default,
    {
        let mut this = self;
        this.teardown.cancel();
        std::mem::take(&mut this.out)
    }
}

impl<W: Write> Drop for ChatScreen<W> {
    fn drop(&mut self) {
        self.teardown.cancel();
    }
}

fn draw_splash_frame<W: Write>(out: &mut W, progress: f64) -> io::Result<()> {
    let filled = ((progress / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(
        out,
        "{} {} {:>3}%  {}",
        "ASTRA".bold(),
        bar.cyan(),
        progress.floor() as u32,
        phase_label(progress)
    )?;
    out.flush()
}

pub fn describe_suggestion(loan: &LoanSuggestion) -> String {
    let mut line = format!(
        "{}: {} Rates from {}%, ${} to ${}",
        loan.name,
        loan.description,
        loan.interest_rate,
        group_thousands(loan.min_amount),
        group_thousands(loan.max_amount)
    );
    if let Some(term) = loan.longest_term() {
        line.push_str(&format!(", terms up to {term} months"));
    }
    line.push('.');
    line
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
