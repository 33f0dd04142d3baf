//! Progress lines for the console. Everything goes through the `log` facade
//! so `RUST_LOG` decides what reaches stderr.

pub fn emit_analysis_started(team: &str, directive: &str) {
    log::info!("[jinju] 🤖 Analyzing for {}: {}", team, preview_str(directive, 60));
}

pub fn emit_analysis_completed(elapsed_ms: u64) {
    log::info!("[jinju] ✅ Analysis completed ({:.1}s)", elapsed_ms as f64 / 1000.0);
}

pub fn emit_saved(team: &str, url: &str) {
    log::info!("[jinju/storage] saved record for {} to {}", team, url);
}

pub fn emit_endpoint_loaded(team: &str, count: usize) {
    log::debug!(
        "[jinju/storage]   ├─ {}: {} record{}",
        team,
        count,
        if count == 1 { "" } else { "s" }
    );
}

pub fn preview_str(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
