use crate::config::AppConfig;
use crate::error::{DirectiveError, Result};
use crate::events;
use crate::inference;
use crate::parser::{self, ParsedSections};
use crate::storage::StorageGateway;
use serde::Serialize;
use std::time::Instant;

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub team: String,
    pub analysis: String,
    pub sections: ParsedSections,
    /// False when the sheet write failed; the analysis is still valid.
    pub saved: bool,
}

/// Analyze one directive and persist it to the team's sheet.
pub async fn submit(
    client: &reqwest::Client,
    config: &AppConfig,
    team_label: &str,
    directive_text: &str,
) -> Result<Submission> {
    if team_label.trim().is_empty() {
        return Err(DirectiveError::InvalidInput("팀 구분을 선택해주세요.".to_string()));
    }
    if directive_text.trim().is_empty() {
        return Err(DirectiveError::InvalidInput("메시지 내용을 입력해주세요.".to_string()));
    }

    events::emit_analysis_started(team_label, directive_text);
    let start = Instant::now();

    let analysis = inference::analyze(client, directive_text, config).await?;
    events::emit_analysis_completed(start.elapsed().as_millis() as u64);

    let sections = parser::parse(&analysis);
    let saved = StorageGateway::new(client, config)
        .save(team_label, directive_text, &analysis)
        .await;

    Ok(Submission {
        team: team_label.to_string(),
        analysis,
        sections,
        saved,
    })
}
