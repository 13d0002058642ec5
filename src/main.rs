use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod cli;
mod command;
mod config;
mod context;
mod errors;
mod export;
mod form;
mod log;
mod prompt;
mod provider;
mod session;
mod ux;
mod view;
mod wire;

use command::Command;
use errors::PlannerError;
use form::FormState;
use provider::Provider;
use session::Session;

const BUSY: &str = "ACE ENGINE PROCESSING...";

fn init_tracing(debug: bool) {
    let fallback = if debug { "ace_planner=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Copy form values given on the command line over the configured defaults.
fn prefill(session: &mut Session, args: &cli::Args) -> Result<(), PlannerError> {
    let form: &mut FormState = &mut session.form;
    if let Some(v) = &args.school {
        form.school = v.clone();
    }
    if let Some(v) = &args.instructor {
        form.instructor = v.clone();
    }
    if let Some(v) = args.grade {
        form.grade = v;
    }
    if let Some(v) = &args.area {
        form.area = v.clone();
    }
    if let Some(v) = args.framework {
        form.framework = v;
    }
    if let Some(v) = &args.topic {
        form.topic = v.clone();
    }
    for path in &args.references {
        session.attach(path)?;
    }
    Ok(())
}

/// Generate, then save artifacts when enabled. Artifact failures are logged only.
async fn generate(
    session: &mut Session,
    provider: Option<&dyn Provider>,
    cfg: &config::Config,
) -> Result<(), PlannerError> {
    let req = session.generate(provider).await?;
    if !cfg.save_artifacts {
        return Ok(());
    }
    if let Some(result) = &session.result {
        let tx = Uuid::new_v4();
        match log::save_generation(Path::new(&cfg.out_dir), tx, &session.form, &req, result) {
            Ok(saved) => tracing::info!(
                dir = %saved.dir.display(),
                request = %saved.request.display(),
                response = %saved.response.display(),
                "artifacts saved"
            ),
            Err(e) => tracing::warn!(error = %e, "could not save artifacts"),
        }
    }
    Ok(())
}

async fn one_shot(
    session: &mut Session,
    provider: Option<&dyn Provider>,
    cfg: &config::Config,
) -> anyhow::Result<()> {
    session.enter();
    let spin = ux::spinner(BUSY);
    let outcome = generate(session, provider, cfg).await;
    spin.finish_and_clear();
    match (outcome, &session.result) {
        (Ok(()), Some(result)) => {
            println!("{}", result.text);
            Ok(())
        }
        (Err(e), _) => {
            eprintln!("{}", ux::error_line(&e));
            std::process::exit(1);
        }
        (Ok(()), None) => anyhow::bail!("generation finished without a result"),
    }
}

async fn run_shell(
    session: &mut Session,
    provider: Option<&dyn Provider>,
    cfg: &config::Config,
) -> anyhow::Result<()> {
    print!("{}", ux::render(session));
    while let Some(line) = ux::read_line(session.screen()) {
        let cmd = match command::parse(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", ux::error_line(&e));
                continue;
            }
        };
        if !cmd.available_on(session.screen()) {
            let e = PlannerError::Usage("only available in the workspace; type 'enter' first".into());
            println!("{}", ux::error_line(&e));
            continue;
        }

        match cmd {
            Command::Quit => break,
            Command::Help => print!("{}", ux::help(session.screen())),
            Command::Enter => {
                if session.enter() {
                    print!("{}", ux::render(session));
                } else {
                    println!("already in the workspace");
                }
            }
            Command::Exit => {
                if session.exit() {
                    print!("{}", ux::render(session));
                } else {
                    println!("already on the landing screen");
                }
            }
            Command::Set(field, value) => match session.form.set(field, &value) {
                Ok(()) => print!("{}", ux::render(session)),
                Err(e) => println!("{}", ux::error_line(&e)),
            },
            Command::Plans(n) => match session.form.set_plan_count(n) {
                Ok(()) => print!("{}", ux::render(session)),
                Err(e) => println!("{}", ux::error_line(&e)),
            },
            Command::Plan(i, topic) => match session.form.set_plan_topic(i, &topic) {
                Ok(()) => print!("{}", ux::render(session)),
                Err(e) => println!("{}", ux::error_line(&e)),
            },
            Command::Attach(path) => match session.attach(&path) {
                Ok(_) => print!("{}", ux::render(session)),
                Err(e) => println!("{}", ux::error_line(&e)),
            },
            Command::Detach(i) => match session.detach(i) {
                Ok(removed) => {
                    println!("removed {}", removed.name);
                    print!("{}", ux::render(session));
                }
                Err(e) => println!("{}", ux::error_line(&e)),
            },
            Command::Reset => {
                session.reset();
                print!("{}", ux::render(session));
            }
            Command::Generate => {
                let spin = ux::spinner(BUSY);
                let outcome = generate(session, provider, cfg).await;
                spin.finish_and_clear();
                match (outcome, &session.result) {
                    (Ok(()), Some(result)) => ux::print_result(result),
                    (Ok(()), None) => {}
                    (Err(e), _) => println!("{}", ux::error_line(&e)),
                }
            }
            Command::Show => match &session.result {
                Some(result) => ux::print_result(result),
                None => println!("no plan generated yet"),
            },
            Command::Save(path) => match &session.result {
                Some(result) => match export::save(&path, result, session.form.framework) {
                    Ok(format) => println!("saved {} ({format:?})", path.display()),
                    Err(e) => println!("✖ could not save: {e:#}"),
                },
                None => println!("no plan generated yet"),
            },
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_tracing(args.debug);

    let mut cfg = config::Config::load(args.config.as_deref())?;
    if let Some(m) = &args.model {
        cfg.model = m.clone();
    }
    if let Some(t) = args.timeout_secs {
        cfg.timeout_secs = t;
    }
    if args.save_artifacts {
        cfg.save_artifacts = true;
    }

    let (provider, config_error) = match provider::make_provider(&cfg) {
        Ok(p) => (Some(p), None),
        Err(e) => {
            tracing::warn!(error = %e, "generation disabled");
            (None, Some(e))
        }
    };

    let mut session = Session::new(&cfg, config_error);
    if let Err(e) = prefill(&mut session, &args) {
        if args.generate {
            eprintln!("{}", ux::error_line(&e));
            std::process::exit(1);
        }
        println!("{}", ux::error_line(&e));
    }

    if args.generate {
        return one_shot(&mut session, provider.as_deref(), &cfg).await;
    }
    run_shell(&mut session, provider.as_deref(), &cfg).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::form::{Framework, GradeLevel};

    #[test]
    fn prefill_copies_only_given_flags() {
        let args = cli::Args::try_parse_from([
            "ace_planner",
            "--grade",
            "Grade 10",
            "--framework",
            "7E's DLL",
            "--topic",
            "Genetics",
        ])
        .unwrap();
        let mut session = Session::new(&Config::default(), None);

        prefill(&mut session, &args).unwrap();

        assert_eq!(session.form.grade, GradeLevel::Grade10);
        assert_eq!(session.form.framework, Framework::Dll7E);
        assert_eq!(session.form.topic, "Genetics");
        assert_eq!(session.form.school, "Araibo National High School");
        assert_eq!(session.form.area, "Mathematics");
    }

    #[test]
    fn prefill_reports_a_bad_reference() {
        let args = cli::Args::try_parse_from(["ace_planner", "--reference", "slides.pptx"]).unwrap();
        let mut session = Session::new(&Config::default(), None);
        assert!(matches!(prefill(&mut session, &args), Err(PlannerError::Attachment(_))));
    }
}
