use jinju_common::history::{self, TeamFilter};
use jinju_common::parser::{self, ParsedSections, Section};
use jinju_common::pipeline::Submission;
use jinju_common::{AnalysisRecord, Team};
use std::fmt::Write;

const SECTION_TITLES: [(Section, &str); 3] = [
    (Section::Summary, "📌 요약"),
    (Section::Intent, "🎯 의도"),
    (Section::Tasks, "✅ 해야할 일"),
];

pub fn team_badge(team: &str) -> String {
    match Team::from_label(team) {
        Some(t) => format!("[{}]", t.label()),
        None => format!("[{}]", team),
    }
}

/// Structured sections when the reply has any, otherwise the raw text.
fn analysis_body(out: &mut String, analysis: &str, sections: &ParsedSections) {
    if sections.is_empty() {
        let _ = writeln!(out, "{}", analysis.trim_end());
        return;
    }
    for (section, title) in SECTION_TITLES {
        let body = sections.get(section);
        if body.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}", title);
        out.push_str(body);
        out.push('\n');
    }
}

pub fn submission(submission: &Submission) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🤖 AI 분석 결과 {}\n", team_badge(&submission.team));
    analysis_body(&mut out, &submission.analysis, &submission.sections);
    if submission.saved {
        out.push_str("✅ 분석이 완료되고 Google Sheets에 저장되었습니다!\n");
    } else {
        out.push_str("⚠️ 분석은 완료되었지만 저장하지 못했습니다.\n");
    }
    out
}

pub fn history(view: &[AnalysisRecord], filter: TeamFilter, source_empty: bool) -> String {
    if source_empty {
        return "저장된 히스토리가 없습니다.\n".to_string();
    }
    if view.is_empty() {
        let name = match filter {
            TeamFilter::All => "전체".to_string(),
            TeamFilter::Team(team) => team.label().to_string(),
        };
        return format!("{} 팀의 히스토리가 없습니다.\n", name);
    }

    let mut out = String::new();
    let _ = writeln!(out, "총 {}건의 분석 결과\n", view.len());
    for record in view {
        let _ = writeln!(out, "{} {}", team_badge(&record.team), record.timestamp);
        let _ = writeln!(out, "메시지: {}", record.directive.trim_end());
        let sections = parser::parse(&record.analysis);
        analysis_body(&mut out, &record.analysis, &sections);
        out.push_str("---\n");
    }
    out
}

pub fn stats(records: &[AnalysisRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "전체 분석 건수: {}", records.len());
    for (team, count) in history::team_counts(records) {
        let _ = writeln!(out, "{} 팀: {}", team, count);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(team: &str, timestamp: &str, analysis: &str) -> AnalysisRecord {
        AnalysisRecord {
            team: team.to_string(),
            timestamp: timestamp.to_string(),
            directive: "포장비 검토".to_string(),
            analysis: analysis.to_string(),
        }
    }

    #[test]
    fn badge_uses_korean_label() {
        assert_eq!(team_badge("Meat"), "[육가공]");
        assert_eq!(team_badge("HR"), "[HR]");
    }

    #[test]
    fn submission_omits_empty_sections() {
        let analysis = "📌 요약:\nCost review\n✅ 해야할 일:\n1. Collect quotes";
        let sub = Submission {
            team: "Meat".to_string(),
            analysis: analysis.to_string(),
            sections: parser::parse(analysis),
            saved: false,
        };
        let text = submission(&sub);
        assert!(text.contains("📌 요약\nCost review\n"));
        assert!(!text.contains("🎯 의도"));
        assert!(text.contains("저장하지 못했습니다"));
    }

    #[test]
    fn unstructured_reply_is_shown_raw() {
        let sub = Submission {
            team: "Brand".to_string(),
            analysis: "plain answer".to_string(),
            sections: ParsedSections::default(),
            saved: true,
        };
        let text = submission(&sub);
        assert!(text.contains("plain answer"));
        assert!(text.contains("저장되었습니다"));
    }

    #[test]
    fn history_messages_distinguish_empty_cases() {
        assert_eq!(history(&[], TeamFilter::All, true), "저장된 히스토리가 없습니다.\n");
        assert_eq!(
            history(&[], TeamFilter::Team(Team::Business), false),
            "사업관리 팀의 히스토리가 없습니다.\n"
        );
    }

    #[test]
    fn history_lists_count_and_entries() {
        let view = vec![rec("육가공", "2024-07-02 09:00:00", "요약:\nA")];
        let text = history(&view, TeamFilter::All, false);
        assert!(text.starts_with("총 1건의 분석 결과"));
        assert!(text.contains("[육가공] 2024-07-02 09:00:00"));
        assert!(text.contains("메시지: 포장비 검토"));
    }

    #[test]
    fn stats_totals_and_per_team() {
        let records = vec![rec("브랜드", "", ""), rec("브랜드", "", ""), rec("육가공", "", "")];
        assert_eq!(stats(&records), "전체 분석 건수: 3\n브랜드 팀: 2\n육가공 팀: 1\n");
    }
}
