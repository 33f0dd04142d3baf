use crate::config::AppConfig;
use crate::error::DirectiveError;
use crate::events;
use crate::record::{AnalysisRecord, Team};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body posted to a team's Apps Script endpoint.
#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    #[serde(rename = "sheetName")]
    sheet_name: &'a str,
    timestamp: &'a str,
    team: &'a str,
    directive: &'a str,
    analysis: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoadResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Vec<Value>>,
}

/// Routes writes to the submitting team's sheet and merges reads across all teams.
///
/// Storage failures never propagate: they are logged as warnings and show up
/// as `false` from the save calls or as missing records from the load calls.
pub struct StorageGateway<'a> {
    client: &'a reqwest::Client,
    config: &'a AppConfig,
}

impl<'a> StorageGateway<'a> {
    pub fn new(client: &'a reqwest::Client, config: &'a AppConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint a save for `team_label` goes to. Unknown labels use the
    /// default endpoint, or an empty URL when none is configured.
    pub fn endpoint_for_label(&self, team_label: &str) -> &'a str {
        match Team::from_label(team_label) {
            Some(team) => self.config.endpoint_for(team).unwrap_or(""),
            None => self.config.default_endpoint.as_deref().unwrap_or(""),
        }
    }

    pub async fn save(&self, team_label: &str, directive: &str, analysis: &str) -> bool {
        let record = AnalysisRecord::new(team_label, directive, analysis);
        self.save_record(&record).await
    }

    pub async fn save_record(&self, record: &AnalysisRecord) -> bool {
        let url = self.endpoint_for_label(&record.team);
        match self.post_record(url, record).await {
            Ok(()) => {
                events::emit_saved(&record.team, url);
                true
            }
            Err(e) => {
                log::warn!("[jinju/storage] {}", e);
                false
            }
        }
    }

    async fn post_record(&self, url: &str, record: &AnalysisRecord) -> Result<(), DirectiveError> {
        if url.is_empty() {
            return Err(DirectiveError::StorageWrite(format!(
                "no endpoint configured for team '{}'",
                record.team
            )));
        }

        let body = SaveRequest {
            sheet_name: &self.config.sheet_name,
            timestamp: &record.timestamp,
            team: &record.team,
            directive: &record.directive,
            analysis: &record.analysis,
        };

        log::info!("[jinju/storage] POST {} (team {})", url, record.team);

        let response = self
            .client
            .post(url)
            .timeout(self.config.storage_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| DirectiveError::StorageWrite(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectiveError::StorageWrite(format!("HTTP {} from {}", status, url)));
        }
        Ok(())
    }

    /// Reads every team's sheet concurrently and concatenates the results in
    /// `Team::ALL` order. A failing endpoint contributes nothing.
    pub async fn load_all(&self) -> Vec<AnalysisRecord> {
        let reads = Team::ALL.into_iter().map(|team| self.load_team(team));
        join_all(reads).await.into_iter().flatten().collect()
    }

    pub async fn load_team(&self, team: Team) -> Vec<AnalysisRecord> {
        let url = match self.config.endpoint_for(team) {
            Some(url) if !url.is_empty() => url,
            _ => {
                log::warn!("[jinju/storage] no read endpoint for {}", team.name());
                return Vec::new();
            }
        };

        match self.fetch(url).await {
            Ok(records) => {
                events::emit_endpoint_loaded(team.name(), records.len());
                records
            }
            Err(e) => {
                log::warn!("[jinju/storage] {} ({}): {}", team.name(), url, e);
                Vec::new()
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<AnalysisRecord>, DirectiveError> {
        log::debug!("[jinju/storage] GET {}?sheetName={}", url, self.config.sheet_name);

        let response = self
            .client
            .get(url)
            .query(&[("sheetName", self.config.sheet_name.as_str())])
            .timeout(self.config.storage_timeout)
            .send()
            .await
            .map_err(|e| DirectiveError::StorageRead(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectiveError::StorageRead(format!("HTTP {}", status)));
        }

        let body: LoadResponse = response
            .json()
            .await
            .map_err(|e| DirectiveError::StorageRead(format!("malformed response: {}", e)))?;

        let rows = match body.data {
            Some(rows) if body.success => rows,
            _ => return Ok(Vec::new()),
        };

        let mut records = Vec::with_capacity(rows.len());
        for (idx, row) in rows.iter().enumerate() {
            match AnalysisRecord::from_row(row) {
                Some(record) => records.push(record),
                None => log::warn!("[jinju/storage] skipping row {} from {}: not an object", idx, url),
            }
        }
        Ok(records)
    }
}
