//! @acp:module "Output Helpers"
//! @acp:summary "Terminal formatting for prompts, scores and rendered results"
//! @acp:domain cli
//! @acp:layer output

use console::style;
use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::diagnosis::{DiagnosticResult, RenderedResult, ZoneTable};

static BOLD_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<b>(.*?)</b>").unwrap());

/// Convert the bot's `<b>` markup into terminal styling
pub fn to_terminal(text: &str) -> String {
    BOLD_TAG
        .replace_all(text, |caps: &Captures<'_>| style(&caps[1]).bold().to_string())
        .into_owned()
}

/// Print message text followed by numbered buttons
pub fn print_rendered(rendered: &RenderedResult) {
    println!("{}\n", to_terminal(&rendered.text));
    for (i, button) in rendered.buttons.iter().enumerate() {
        println!(
            "  {} {} {}",
            style(format!("[{}]", i + 1)).cyan(),
            button.label,
            style(format!("({})", button.action)).dim()
        );
    }
}

/// Print raw and normalized scores, bottleneck first
pub fn print_scores(result: &DiagnosticResult, table: &ZoneTable) {
    println!("{}:", style("Scores").bold());
    for zone in table.priority() {
        let marker = if *zone == result.bottleneck {
            style("●").red().to_string()
        } else if Some(*zone) == result.perceived {
            style("◆").yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {} {:10} raw={}/{} norm={:.2}",
            marker,
            zone.as_str(),
            result.raw_scores.get(zone).copied().unwrap_or(0),
            table.max_score(*zone),
            result.norm_scores.get(zone).copied().unwrap_or(0.0)
        );
    }
    let perceived = result
        .perceived
        .map(|z| z.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "  bottleneck={} perceived={} twist={}\n",
        result.bottleneck, perceived, result.twist
    );
}
