use crate::config::AppConfig;
use crate::error::{DirectiveError, Result};
use serde_json::{json, Value};

const SYSTEM_PROMPT: &str = include_str!("../prompts/system-prompt-ko.md");

/// Returned when the model answers 2xx but without `result.response`.
pub const RESULT_UNAVAILABLE: &str = "분석 결과를 가져올 수 없습니다.";

pub fn build_messages(directive_text: &str) -> Value {
    json!([
        {"role": "system", "content": SYSTEM_PROMPT.trim_end()},
        {"role": "user", "content": format!("다음 메시지를 분석해주세요:\n\n{}", directive_text)}
    ])
}

/// Sends one directive to the Workers AI endpoint and returns the raw reply text.
///
/// Stateless: no retry, no streaming. The caller makes sure `directive_text`
/// is not blank.
pub async fn analyze(
    client: &reqwest::Client,
    directive_text: &str,
    config: &AppConfig,
) -> Result<String> {
    let url = config.inference_url();
    let request_body = json!({
        "messages": build_messages(directive_text),
        "max_tokens": config.max_tokens,
    });

    log::info!("[jinju/inference] POST {}", url);

    let response = client
        .post(&url)
        .bearer_auth(&config.api_token)
        .timeout(config.inference_timeout)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| DirectiveError::Inference(format!("request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let excerpt: String = body.chars().take(500).collect();
        log::error!("[jinju/inference] API error {}: {}", status, excerpt);
        return Err(DirectiveError::Inference(format!("API error ({}): {}", status, excerpt)));
    }

    let result: Value = response
        .json()
        .await
        .map_err(|e| DirectiveError::Inference(format!("invalid JSON response: {}", e)))?;

    Ok(extract_response(&result))
}

fn extract_response(result: &Value) -> String {
    result
        .get("result")
        .and_then(|r| r.get("response"))
        .and_then(|r| r.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| RESULT_UNAVAILABLE.to_string())
}
