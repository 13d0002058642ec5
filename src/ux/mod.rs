use colored::Colorize;
use humansize::{format_size, DECIMAL};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use crate::context::ReferenceKind;
use crate::errors::PlannerError;
use crate::session::Session;
use crate::view::Screen;
use crate::wire::GenerationResult;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

pub fn render(session: &Session) -> String {
    match session.screen() {
        Screen::Landing => landing(session),
        Screen::Workspace => workspace(session),
    }
}

fn banner(session: &Session, out: &mut String) {
    if let Some(e) = &session.config_error {
        let _ = writeln!(out, "{}", format!("⚠ {e}").on_red().white().bold());
    }
}

pub fn landing(session: &Session) -> String {
    let mut out = String::new();
    banner(session, &mut out);
    let _ = writeln!(out, "\n{} {}", "ACE AI".bold(), "PLANNER".truecolor(255, 68, 0).bold());
    let _ = writeln!(out, "{}", "DepEd Professional Instructional Design".dimmed());
    let _ = writeln!(out, "\n  type {} to open the workspace, {} to leave\n", "enter".bold(), "quit".bold());
    out
}

pub fn workspace(session: &Session) -> String {
    let form = &session.form;
    let mut out = String::new();
    banner(session, &mut out);

    let _ = writeln!(out, "{}", RULE.bold());
    let _ = writeln!(
        out,
        "  {} {}   {}",
        "ACE AI".bold(),
        "PLANNER".truecolor(255, 68, 0).bold(),
        format!("model: {}", session.model()).dimmed()
    );
    let _ = writeln!(out, "{}", RULE.bold());
    let _ = writeln!(out, "  {:<12} {}", "School".cyan(), form.school);
    let _ = writeln!(out, "  {:<12} {}", "Instructor".cyan(), form.instructor);
    let _ = writeln!(out, "  {:<12} {}", "Grade".cyan(), form.grade);
    let _ = writeln!(out, "  {:<12} {}", "Area".cyan(), form.area);
    let _ = writeln!(out, "  {:<12} {}", "Framework".cyan(), form.framework.label());

    if form.framework.is_log() || form.plan_topics.is_empty() {
        let label = if form.framework.is_log() { "Theme" } else { "Topic" };
        let _ = writeln!(out, "  {:<12} {}", label.cyan(), display_or_dash(&form.topic));
    } else {
        let _ = writeln!(out, "  {:<12} {}", "Plan 1".cyan(), display_or_dash(&form.topic));
        for (i, t) in form.plan_topics.iter().enumerate() {
            let _ = writeln!(out, "  {:<12} {}", format!("Plan {}", i + 2).cyan(), display_or_dash(t));
        }
    }

    if form.references.is_empty() {
        let _ = writeln!(out, "  {:<12} {}", "References".cyan(), "no files attached".dimmed());
    } else {
        let _ = writeln!(out, "  {}", "References".cyan());
        for (i, r) in form.references.iter().enumerate() {
            let note = match r.kind {
                ReferenceKind::Text => "",
                ReferenceKind::Pdf | ReferenceKind::Docx => "  (listed by name only)",
            };
            let _ = writeln!(out, "    {}. {} {}{}", i + 1, r.name, format_size(r.bytes, DECIMAL).dimmed(), note.dimmed());
        }
    }

    if let Some(e) = &session.last_error {
        let _ = writeln!(out, "\n{}", error_line(e));
    }
    if let Some(r) = &session.result {
        let _ = writeln!(
            out,
            "\n{} {}",
            "Latest plan".bold(),
            format!("generated {}", r.generated_at.format("%Y-%m-%d %H:%M UTC")).dimmed()
        );
        let _ = writeln!(out, "  type {} to print it", "show".bold());
    }
    out
}

fn display_or_dash(s: &str) -> &str {
    if s.trim().is_empty() { "—" } else { s }
}

pub fn error_line(e: &PlannerError) -> String {
    if e.is_validation() || matches!(e, PlannerError::Usage(_)) {
        format!("⚠ {e}").yellow().to_string()
    } else {
        format!("✖ {e}").red().bold().to_string()
    }
}

pub fn help(screen: Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Commands".bold());
    match screen {
        Screen::Landing => {
            let _ = writeln!(out, "  enter                      open the workspace");
        }
        Screen::Workspace => {
            let _ = writeln!(out, "  set <field> <value>        school, instructor, grade, area, framework, topic");
            let _ = writeln!(out, "  plans <n>                  number of daily plans (DLP only)");
            let _ = writeln!(out, "  plan <i> <topic>           topic for plan i");
            let _ = writeln!(out, "  attach <path>              add a .txt/.md/.pdf/.docx reference");
            let _ = writeln!(out, "  detach <i>                 remove reference i");
            let _ = writeln!(out, "  generate                   build the plan");
            let _ = writeln!(out, "  show                       print the latest plan");
            let _ = writeln!(out, "  save <path>                export the latest plan (.md, or .doc for Word)");
            let _ = writeln!(out, "  reset                      clear topics and result");
            let _ = writeln!(out, "  exit                       back to the landing screen");
        }
    }
    let _ = writeln!(out, "  help, quit");
    out
}

/// Plan text exactly as the model returned it.
pub fn print_result(result: &GenerationResult) {
    println!("\n{}\n{}\n{}\n", RULE.dimmed(), result.text, RULE.dimmed());
}

pub fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.red} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Read one command line. `None` on end of input.
pub fn read_line(screen: Screen) -> Option<String> {
    print!("{} ", format!("[{screen}]>").bold());
    let _ = io::stdout().flush();
    let mut s = String::new();
    match io::stdin().lock().read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s),
    }
}
