//! Splits a model reply into Summary / Intent / Tasks.
//!
//! Single pass over lines with a section cursor. A line containing a marker
//! moves the cursor and is dropped; other non-blank lines are appended to the
//! active section. Text before the first marker is dropped.

use regex::RegexSet;
use serde::{Deserialize, Serialize};

pub const SUMMARY_MARKERS: &[&str] = &["📌 요약", "요약:"];
pub const INTENT_MARKERS: &[&str] = &["🎯 의도", "의도:"];
pub const TASKS_MARKERS: &[&str] = &["✅ 해야할 일", "해야할 일:", "액션 아이템"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Intent,
    Tasks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSections {
    pub summary: String,
    pub intent: String,
    pub tasks: String,
}

impl ParsedSections {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.intent.is_empty() && self.tasks.is_empty()
    }

    pub fn get(&self, section: Section) -> &str {
        match section {
            Section::Summary => &self.summary,
            Section::Intent => &self.intent,
            Section::Tasks => &self.tasks,
        }
    }

    fn buffer_mut(&mut self, section: Section) -> &mut String {
        match section {
            Section::Summary => &mut self.summary,
            Section::Intent => &mut self.intent,
            Section::Tasks => &mut self.tasks,
        }
    }
}

/// Ordered marker list. Earlier entries win when a line matches several.
pub struct SectionMarkers {
    sections: Vec<Section>,
    set: RegexSet,
}

impl SectionMarkers {
    pub fn new(entries: &[(Section, &[&str])]) -> Result<Self, regex::Error> {
        let mut sections = Vec::new();
        let mut patterns = Vec::new();
        for (section, markers) in entries {
            for marker in markers.iter() {
                sections.push(*section);
                patterns.push(regex::escape(marker));
            }
        }
        let set = RegexSet::new(&patterns)?;
        Ok(Self { sections, set })
    }

    fn classify(&self, line: &str) -> Option<Section> {
        // RegexSet reports matches in pattern order
        self.set
            .matches(line)
            .into_iter()
            .next()
            .map(|idx| self.sections[idx])
    }
}

impl Default for SectionMarkers {
    fn default() -> Self {
        let entries: [(Section, &[&str]); 3] = [
            (Section::Summary, SUMMARY_MARKERS),
            (Section::Intent, INTENT_MARKERS),
            (Section::Tasks, TASKS_MARKERS),
        ];
        // Escaped literals always compile.
        Self::new(&entries).unwrap_or_else(|e| panic!("built-in section markers: {}", e))
    }
}

pub fn parse(analysis: &str) -> ParsedSections {
    parse_with(analysis, &SectionMarkers::default())
}

pub fn parse_with(analysis: &str, markers: &SectionMarkers) -> ParsedSections {
    let mut sections = ParsedSections::default();
    let mut current: Option<Section> = None;

    for line in analysis.lines() {
        if let Some(section) = markers.classify(line) {
            current = Some(section);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Some(section) = current {
            let buffer = sections.buffer_mut(section);
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meat_team_example() {
        let analysis = "📌 요약:\nCost review\n🎯 의도:\nReduce costs\n✅ 해야할 일:\n1. Collect vendor quotes\n2. Compare packaging materials";
        let parsed = parse(analysis);
        assert_eq!(parsed.summary, "Cost review\n");
        assert_eq!(parsed.intent, "Reduce costs\n");
        assert_eq!(parsed.tasks, "1. Collect vendor quotes\n2. Compare packaging materials\n");
    }

    #[test]
    fn headers_never_leak_into_sections() {
        let analysis = "📌 요약:\n\n포장 원가 검토\n\n🎯 의도:\n원가 절감\n\n✅ 해야할 일:\n1. 견적 수집\n";
        let parsed = parse(analysis);
        for text in [&parsed.summary, &parsed.intent, &parsed.tasks] {
            assert!(!text.is_empty());
            assert!(!text.contains("📌"));
            assert!(!text.contains("🎯"));
            assert!(!text.contains("✅"));
        }
    }

    #[test]
    fn missing_intent_header_leaves_intent_empty() {
        let analysis = "📌 요약:\nCost review\n✅ 해야할 일:\n1. Collect vendor quotes";
        let parsed = parse(analysis);
        assert_eq!(parsed.intent, "");
        assert_eq!(parsed.summary, "Cost review\n");
        assert_eq!(parsed.tasks, "1. Collect vendor quotes\n");
    }

    #[test]
    fn leading_unlabeled_text_is_dropped() {
        let parsed = parse("Sure! Here is the analysis.\n요약:\nA\n의도:\nB\n액션 아이템\n1. C");
        assert_eq!(parsed.summary, "A\n");
        assert_eq!(parsed.intent, "B\n");
        assert_eq!(parsed.tasks, "1. C\n");
    }

    #[test]
    fn no_markers_means_nothing_to_display() {
        let parsed = parse("just some text\nwith no headers");
        assert!(parsed.is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn repeated_header_appends_to_same_section() {
        let parsed = parse("요약:\nfirst\n의도:\nwhy\n요약:\nsecond");
        assert_eq!(parsed.summary, "first\nsecond\n");
        assert_eq!(parsed.intent, "why\n");
    }

    #[test]
    fn custom_markers() {
        let summary: &[&str] = &["Summary"];
        let intent: &[&str] = &["Intent"];
        let tasks: &[&str] = &["Action items"];
        let markers = SectionMarkers::new(&[
            (Section::Summary, summary),
            (Section::Intent, intent),
            (Section::Tasks, tasks),
        ])
        .unwrap();
        let parsed = parse_with("Summary:\nS\nIntent:\nI\nAction items:\n1. T", &markers);
        assert_eq!(parsed.get(Section::Summary), "S\n");
        assert_eq!(parsed.get(Section::Intent), "I\n");
        assert_eq!(parsed.get(Section::Tasks), "1. T\n");
    }
}
