//! Plain-text rendering of the screens' view models, and stdin prompts.

use std::io::{self, BufRead, Write};

use prakriti_screens::admin::{self, AdminScreen};
use prakriti_screens::assessment::{AssessmentScreen, DotState, ForwardAction};
use prakriti_screens::confirm::Confirm;
use prakriti_screens::schedule::{self, ScheduleScreen, ScheduleState};

pub fn render_question(out: &mut impl Write, screen: &AssessmentScreen) -> io::Result<()> {
    let Some(view) = screen.question_view() else {
        return writeln!(out, "No questions available.");
    };
    writeln!(
        out,
        "[{}] Question {} of {}    {} of {} answered ({:.0}%)",
        view.category,
        view.number,
        view.total,
        screen.answered_count(),
        view.total,
        screen.progress()
    )?;
    writeln!(out, "{}", dot_strip(&screen.dots()))?;
    writeln!(out)?;
    writeln!(out, "{}", view.prompt)?;
    for (i, option) in view.options.iter().enumerate() {
        let mark = if option.selected { '*' } else { ' ' };
        writeln!(out, " {mark} {}) {}", i + 1, option.text)?;
    }
    writeln!(out)?;

    let mut actions = Vec::new();
    if screen.previous_enabled() {
        actions.push("p = previous".to_string());
    }
    match screen.forward_action() {
        ForwardAction::Next => actions.push("n = next".to_string()),
        ForwardAction::Submit { submitting: true, .. } => actions.push("submitting...".to_string()),
        ForwardAction::Submit { enabled, .. } => {
            let suffix = if enabled { "" } else { " (answer all questions first)" };
            actions.push(format!("s = submit{suffix}"));
        }
    }
    actions.push("g N = go to question".to_string());
    actions.push("q = quit".to_string());
    writeln!(out, "{}", actions.join(", "))
}

fn dot_strip(dots: &[DotState]) -> String {
    dots.iter()
        .map(|d| match d {
            DotState::Current => '@',
            DotState::Answered => '#',
            DotState::Unanswered => '.',
        })
        .collect()
}

pub fn render_schedule(out: &mut impl Write, screen: &ScheduleScreen) -> io::Result<()> {
    match screen.state() {
        ScheduleState::Loading => return writeln!(out, "Loading..."),
        ScheduleState::NeedsAssessment => return writeln!(out, "{}", schedule::NEEDS_ASSESSMENT),
        ScheduleState::Ready(_) => {}
    }
    if let Some(header) = screen.header() {
        writeln!(out, "{}", header.title)?;
        writeln!(out, "{}", header.subtitle)?;
    }
    for group in screen.groups() {
        writeln!(out)?;
        writeln!(out, "== {} ==", group.title)?;
        for activity in &group.activities {
            match &activity.duration {
                Some(duration) => writeln!(out, "- {} ({duration})", activity.activity)?,
                None => writeln!(out, "- {}", activity.activity)?,
            }
            if let Some(description) = &activity.description {
                writeln!(out, "    {description}")?;
            }
            if let Some(benefits) = &activity.benefits {
                writeln!(out, "    Benefits: {benefits}")?;
            }
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", schedule::TIPS_TITLE)?;
    for tip in schedule::TIPS {
        writeln!(out, "  * {tip}")?;
    }
    Ok(())
}

pub fn render_accounts(out: &mut impl Write, screen: &AdminScreen) -> io::Result<()> {
    let rows = screen.account_rows();
    if rows.is_empty() {
        return writeln!(out, "{}", admin::NO_USERS);
    }
    for row in rows {
        let mark = if row.selected { '>' } else { ' ' };
        writeln!(out, "{mark} {}  {}  <{}>", row.id, row.full_name, row.email)?;
    }
    Ok(())
}

pub fn render_selection(out: &mut impl Write, screen: &AdminScreen) -> io::Result<()> {
    let Some(details) = screen.details() else {
        return writeln!(out, "{}", admin::SELECT_USER);
    };
    writeln!(out, "{} <{}>", details.full_name, details.email)?;
    writeln!(
        out,
        "Age: {}  Gender: {}  Height: {}  Weight: {}",
        details.age, details.gender, details.height, details.weight
    )?;
    writeln!(out)?;

    let rows = screen.follow_up_rows();
    if rows.is_empty() {
        return writeln!(out, "{}", admin::NO_FOLLOW_UPS);
    }
    for row in rows {
        let status = if row.completed { " [Completed]" } else { "" };
        writeln!(
            out,
            "{}  {}  {} ({}){status}",
            row.id, row.scheduled, row.title, row.kind
        )?;
        if let Some(description) = &row.description {
            writeln!(out, "    {description}")?;
        }
    }
    Ok(())
}

/// Print `prompt` and read one trimmed line. `None` at end of input.
pub fn read_line(input: &mut impl BufRead, out: &mut impl Write, prompt: &str) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Yes/no on the process's stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        match read_line(&mut stdin.lock(), &mut stdout, &format!("{prompt} [y/N] ")) {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read confirmation");
                false
            }
        }
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")
}
