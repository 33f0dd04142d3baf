use crate::record::{AnalysisRecord, Team};
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(Team),
}

impl TeamFilter {
    pub fn matches(&self, record: &AnalysisRecord) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(team) => record.resolved_team() == Some(*team),
        }
    }
}

impl FromStr for TeamFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") || s == "전체" {
            return Ok(TeamFilter::All);
        }
        Team::from_label(s)
            .map(TeamFilter::Team)
            .ok_or_else(|| format!("unknown team filter: {}", s))
    }
}

/// Filtered history, newest first.
///
/// Records arrive grouped by endpoint, so the list is reversed and then
/// stable-sorted on the timestamp; records sharing a timestamp keep the
/// reversed order.
pub fn history_view(records: &[AnalysisRecord], filter: TeamFilter) -> Vec<AnalysisRecord> {
    let mut view: Vec<AnalysisRecord> = records
        .iter()
        .rev()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();
    view.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    view
}

/// Records per team, most frequent first. Known teams are grouped under their
/// Korean label whichever form was saved; unknown labels count as-is and
/// blank labels are skipped.
pub fn team_counts(records: &[AnalysisRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let key = match record.resolved_team() {
            Some(team) => team.label(),
            None if record.team.is_empty() => continue,
            None => record.team.as_str(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(team, count)| (team.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(team: &str, timestamp: &str, directive: &str) -> AnalysisRecord {
        AnalysisRecord {
            team: team.to_string(),
            timestamp: timestamp.to_string(),
            directive: directive.to_string(),
            analysis: String::new(),
        }
    }

    #[test]
    fn newest_first_across_endpoints() {
        let records = vec![
            rec("브랜드", "2024-07-01 09:00:00", "b1"),
            rec("브랜드", "2024-07-03 09:00:00", "b2"),
            rec("육가공", "2024-07-02 09:00:00", "m1"),
        ];
        let view = history_view(&records, TeamFilter::All);
        let order: Vec<&str> = view.iter().map(|r| r.directive.as_str()).collect();
        assert_eq!(order, vec!["b2", "m1", "b1"]);
    }

    #[test]
    fn equal_timestamps_keep_reversed_order() {
        let records = vec![
            rec("Meat", "2024-07-01 09:00:00", "first"),
            rec("Meat", "2024-07-01 09:00:00", "second"),
        ];
        let view = history_view(&records, TeamFilter::All);
        assert_eq!(view[0].directive, "second");
        assert_eq!(view[1].directive, "first");
    }

    #[test]
    fn filter_by_team_accepts_either_label() {
        let records = vec![
            rec("Meat", "2024-07-01 09:00:00", "english"),
            rec("육가공", "2024-07-02 09:00:00", "korean"),
            rec("브랜드", "2024-07-03 09:00:00", "other"),
        ];
        let filter: TeamFilter = "meat".parse().unwrap();
        let view = history_view(&records, filter);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.directive != "other"));
    }

    #[test]
    fn filter_parsing() {
        assert_eq!("전체".parse::<TeamFilter>().unwrap(), TeamFilter::All);
        assert_eq!("ALL".parse::<TeamFilter>().unwrap(), TeamFilter::All);
        assert_eq!(
            "사업관리".parse::<TeamFilter>().unwrap(),
            TeamFilter::Team(Team::Business)
        );
        assert!("HR".parse::<TeamFilter>().is_err());
    }

    #[test]
    fn counts_merge_english_and_korean_labels() {
        let records = vec![
            rec("Meat", "", ""),
            rec("육가공", "", ""),
            rec("meat", "", ""),
            rec("HR", "", ""),
        ];
        assert_eq!(
            team_counts(&records),
            vec![("육가공".to_string(), 3), ("HR".to_string(), 1)]
        );
    }

    #[test]
    fn counts_by_label() {
        let records = vec![
            rec("브랜드", "", ""),
            rec("육가공", "", ""),
            rec("육가공", "", ""),
            rec("", "", ""),
        ];
        assert_eq!(
            team_counts(&records),
            vec![("육가공".to_string(), 2), ("브랜드".to_string(), 1)]
        );
    }
}
