//! @acp:module "Play Command"
//! @acp:summary "Run the quiz interactively in the terminal and show the diagnosis"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::Serialize;
use uuid::Uuid;

use super::build_engine;
use super::output::{print_rendered, to_terminal};
use crate::collector::questions::NICHE_CUSTOM;
use crate::collector::{Profile, Prompt, QuizSession, Step};
use crate::config::Config;
use crate::diagnosis::{CliOverrides, DiagnosticResult, RenderedResult};

/// Options for the play command
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Skip the "what do you think is wrong" question
    pub short: bool,
    /// Print the outcome as JSON
    pub json: bool,
    /// Threshold and template var overrides
    pub overrides: CliOverrides,
}

/// Everything a finished session produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaySummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub profile: Profile,
    pub result: DiagnosticResult,
    pub message: RenderedResult,
}

/// Execute the play command
pub fn execute_play(options: PlayOptions, config: &Config) -> Result<()> {
    let engine = build_engine(config, &options.overrides)?;
    let theme = ColorfulTheme::default();

    println!("👋 {}\n", style("Your personal year-end detective is ready.").bold());
    println!(
        "If 2025 didn't go the way you wanted, let's run a small investigation:\n\
         who is eating your growth, and why you are not where you could be.\n\n\
         In 2–3 minutes you'll see your bottleneck and what to do about it in 2026.\n"
    );

    let start = Confirm::with_theme(&theme)
        .with_prompt("Start the investigation?")
        .default(true)
        .interact()?;
    if !start {
        println!("Understood! 😊 Run {} whenever you're ready. 🕵️", style("quiz play").cyan());
        return Ok(());
    }

    let mut session = QuizSession::new(config.ask_perceived && !options.short);
    while let Some(prompt) = session.prompt() {
        println!("\n{}", style(&prompt.title).bold());
        println!("{}", to_terminal(&prompt.text));

        if let Err(err) = ask(&theme, &prompt, &mut session)? {
            eprintln!("{} {}", style("✗").red(), err);
        }
    }

    let session_id = session.id();
    let started_at = session.started_at();
    let (profile, answers) = session.finish()?;

    let result = engine.compute_result(&answers);
    let message = engine.render(&result, None);

    if options.json {
        let summary = PlaySummary {
            session_id,
            started_at,
            profile,
            result,
            message,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "\n{} Diagnosis complete. Analysing your answers...\n",
            style("✓").green()
        );
        print_rendered(&message);
    }

    Ok(())
}

/// Ask one prompt. The outer error is terminal I/O, the inner one is a
/// rejected answer that should be asked again.
fn ask(
    theme: &ColorfulTheme,
    prompt: &Prompt,
    session: &mut QuizSession,
) -> Result<crate::Result<Step>> {
    if prompt.options.is_empty() {
        let text: String = Input::with_theme(theme).with_prompt(">").interact_text()?;
        return Ok(session.submit_text(&text));
    }

    let labels: Vec<&str> = prompt.options.iter().map(|o| o.label.as_str()).collect();
    let index = Select::with_theme(theme)
        .items(&labels)
        .default(0)
        .interact()?;
    let option = &prompt.options[index];

    if prompt.accepts_text && option.id == NICHE_CUSTOM {
        let text: String = Input::with_theme(theme)
            .with_prompt("Your field")
            .interact_text()?;
        return Ok(session.submit_text(&text));
    }

    Ok(session.submit_choice(&option.id))
}
