//! @acp:module "Diagnosis Renderer"
//! @acp:summary "Turn a diagnostic result into message text and buttons"
//! @acp:domain diagnosis
//! @acp:layer output

use anyhow::{anyhow, Result};

use super::table::ZoneTable;
use super::tokens::{substitute, Token, TokenValues};
use super::types::*;

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown output format: {}", s)),
        }
    }
}

/// Message shown when a zone has no authored copy
pub fn placeholder_text(zone: Zone) -> String {
    format!("⚠️ Result copy for zone '{}' has not been written yet", zone)
}

/// Render the final message and buttons for a result
pub fn render_result(
    result: &DiagnosticResult,
    table: &ZoneTable,
    fallback_complaint: &str,
    vars: &TemplateVars,
) -> RenderedResult {
    let Some(series) = table.get(result.bottleneck).series.as_ref() else {
        tracing::warn!("Rendering placeholder for zone '{}'", result.bottleneck);
        return RenderedResult {
            text: placeholder_text(result.bottleneck),
            buttons: Vec::new(),
        };
    };

    let values = global_values(vars).set(Token::Bottleneck, table.label(result.bottleneck));

    let text = match result.perceived.filter(|_| result.twist) {
        Some(perceived) => {
            let complaint = table
                .get(perceived)
                .complaint
                .as_deref()
                .unwrap_or(fallback_complaint);
            let values = values
                .set(Token::Perceived, table.label(perceived))
                .set(Token::Complaint, complaint);
            substitute(&series.twist, &values)
        }
        None => substitute(&series.confirmation, &values),
    };

    RenderedResult {
        text,
        buttons: render_buttons(series, vars),
    }
}

/// Fill global vars into button labels; ids pass through
pub fn render_buttons(series: &ResultSeries, vars: &TemplateVars) -> Vec<RenderedButton> {
    let values = global_values(vars);
    series
        .buttons
        .iter()
        .map(|button| RenderedButton {
            label: substitute(&button.text, &values),
            action: button.id.clone(),
        })
        .collect()
}

fn global_values(vars: &TemplateVars) -> TokenValues<'_> {
    TokenValues::new()
        .set(Token::Expert, &vars.expert_name)
        .set(Token::Product, &vars.product)
        .set(Token::CodeWord, &vars.code_word)
}

/// JSON document with both the diagnosis and its rendering
pub fn render_json(result: &DiagnosticResult, rendered: &RenderedResult) -> Result<String> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        result: &'a DiagnosticResult,
        message: &'a RenderedResult,
    }

    serde_json::to_string_pretty(&JsonOutput {
        result,
        message: rendered,
    })
    .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnosis::table::tests::test_config;

    fn series() -> ResultSeries {
        ResultSeries {
            confirmation: "{EXPERT}: your bottleneck is {BOTTLENECK}{COMPLAINT}.".to_string(),
            twist: "You think it's {COMPLAINT} ({PERCEIVED}), but it's {BOTTLENECK}. {UNKNOWN}"
                .to_string(),
            buttons: vec![
                ButtonTemplate {
                    id: "book_call".to_string(),
                    text: "Book {PRODUCT} with {EXPERT}".to_string(),
                },
                ButtonTemplate {
                    id: "get_guide".to_string(),
                    text: "Send code {CODE_WORD}".to_string(),
                },
            ],
        }
    }

    fn table_with_sales_copy() -> ZoneTable {
        let mut config = test_config();
        let sales = config.zones.get_mut(&Zone::Sales).unwrap();
        sales.series = Some(series());
        config.zones.get_mut(&Zone::Product).unwrap().complaint =
            Some("too many ideas".to_string());
        ZoneTable::from_config(&config).unwrap()
    }

    fn result(perceived: Option<Zone>, twist: bool) -> DiagnosticResult {
        DiagnosticResult {
            bottleneck: Zone::Sales,
            perceived,
            twist,
            norm_scores: Zone::ALL.into_iter().map(|z| (z, 0.0)).collect(),
            raw_scores: zeroed_scores(),
        }
    }

    fn vars() -> TemplateVars {
        TemplateVars {
            expert_name: "Anna".to_string(),
            product: "Mentoring".to_string(),
            code_word: "GROW".to_string(),
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_confirmation_rendering() {
        let table = table_with_sales_copy();
        let rendered = render_result(&result(None, false), &table, "?", &vars());
        assert_eq!(rendered.text, "Anna: your bottleneck is Sales.");
    }

    #[test]
    fn test_twist_rendering_uses_complaint() {
        let table = table_with_sales_copy();
        let rendered = render_result(&result(Some(Zone::Product), true), &table, "?", &vars());
        assert_eq!(
            rendered.text,
            "You think it's too many ideas (Product), but it's Sales. {UNKNOWN}"
        );
    }

    #[test]
    fn test_twist_falls_back_to_generic_complaint() {
        let table = table_with_sales_copy();
        let rendered = render_result(
            &result(Some(Zone::Traffic), true),
            &table,
            "an unclear problem",
            &vars(),
        );
        assert!(rendered.text.starts_with("You think it's an unclear problem (Traffic)"));
    }

    #[test]
    fn test_mismatch_without_twist_is_confirmation() {
        let table = table_with_sales_copy();
        let rendered = render_result(&result(Some(Zone::Product), false), &table, "?", &vars());
        assert_eq!(rendered.text, "Anna: your bottleneck is Sales.");
    }

    #[test]
    fn test_buttons_keep_order_and_ids() {
        let table = table_with_sales_copy();
        let rendered = render_result(&result(None, false), &table, "?", &vars());
        assert_eq!(
            rendered.buttons,
            vec![
                RenderedButton {
                    label: "Book Mentoring with Anna".to_string(),
                    action: "book_call".to_string(),
                },
                RenderedButton {
                    label: "Send code GROW".to_string(),
                    action: "get_guide".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_series_placeholder() {
        let table = ZoneTable::from_config(&test_config()).unwrap();
        let rendered = render_result(&result(None, false), &table, "?", &vars());
        assert!(rendered.text.contains("sales"));
        assert!(!rendered.text.is_empty());
        assert!(rendered.buttons.is_empty());
    }

    #[test]
    fn test_render_json_contains_both_parts() {
        let table = table_with_sales_copy();
        let diagnosis = result(None, false);
        let rendered = render_result(&diagnosis, &table, "?", &vars());
        let json = render_json(&diagnosis, &rendered).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["bottleneck"], "sales");
        assert_eq!(value["message"]["buttons"][0]["action"], "book_call");
    }
}
