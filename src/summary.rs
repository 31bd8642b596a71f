use crate::history::AttemptRecord;
use itertools::Itertools;
use std::collections::BTreeMap;

/// Accuracy bucket for one grouping key. A bucket only exists for keys
/// observed in history, so `count` is always at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStat {
    pub count: usize,
    pub correct_count: usize,
    pub accuracy_pct: f64,
}

/// Session accuracy grouped by exam period and by category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summaries {
    pub by_period: BTreeMap<String, GroupStat>,
    pub by_category: BTreeMap<String, GroupStat>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Groups attempts by `key` and computes count, correct count, and accuracy
/// percent rounded to one decimal. Keys never seen in history are absent.
pub fn summarize_by<F>(records: &[AttemptRecord], key: F) -> BTreeMap<String, GroupStat>
where
    F: Fn(&AttemptRecord) -> &str,
{
    records
        .iter()
        .map(|r| (key(r).to_string(), r.was_correct))
        .into_group_map()
        .into_iter()
        .map(|(group, outcomes)| {
            let count = outcomes.len();
            let correct_count = outcomes.iter().filter(|correct| **correct).count();
            let accuracy_pct = round1(correct_count as f64 / count as f64 * 100.0);
            (
                group,
                GroupStat {
                    count,
                    correct_count,
                    accuracy_pct,
                },
            )
        })
        .collect()
}

pub fn summarize(records: &[AttemptRecord]) -> Summaries {
    Summaries {
        by_period: summarize_by(records, |r| &r.period),
        by_category: summarize_by(records, |r| &r.category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(period: &str, category: &str, was_correct: bool) -> AttemptRecord {
        AttemptRecord {
            question_id: "Q1".to_string(),
            category: category.to_string(),
            period: period.to_string(),
            was_correct,
        }
    }

    #[test]
    fn empty_history_yields_no_groups() {
        let summaries = summarize(&[]);
        assert!(summaries.by_period.is_empty());
        assert!(summaries.by_category.is_empty());
    }

    #[test]
    fn groups_by_period_with_correct_counts() {
        let records = vec![
            record("R1", "c", true),
            record("R1", "c", false),
            record("R2", "c", true),
        ];

        let by_period = summarize_by(&records, |r| &r.period);

        let keys: Vec<&str> = by_period.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"R1"));
        assert!(keys.contains(&"R2"));

        let r1 = &by_period["R1"];
        assert_eq!(r1.count, 2);
        assert_eq!(r1.correct_count, 1);
        assert_eq!(r1.accuracy_pct, 50.0);

        let r2 = &by_period["R2"];
        assert_eq!(r2.count, 1);
        assert_eq!(r2.correct_count, 1);
        assert_eq!(r2.accuracy_pct, 100.0);
    }

    #[test]
    fn groups_by_category_independently_of_period() {
        let records = vec![
            record("R1", "networks", false),
            record("R2", "networks", false),
            record("R1", "security", true),
        ];

        let by_category = summarize_by(&records, |r| &r.category);
        assert_eq!(by_category["networks"].count, 2);
        assert_eq!(by_category["networks"].accuracy_pct, 0.0);
        assert_eq!(by_category["security"].accuracy_pct, 100.0);
    }

    #[test]
    fn accuracy_rounds_to_one_decimal() {
        let records = vec![
            record("R1", "c", true),
            record("R1", "c", false),
            record("R1", "c", false),
        ];

        let by_period = summarize_by(&records, |r| &r.period);
        assert_eq!(by_period["R1"].accuracy_pct, 33.3);

        let records = vec![
            record("R2", "c", true),
            record("R2", "c", true),
            record("R2", "c", false),
        ];
        let by_period = summarize_by(&records, |r| &r.period);
        assert_eq!(by_period["R2"].accuracy_pct, 66.7);
    }

    #[test]
    fn repeated_attempts_all_count() {
        let records = vec![
            record("R1", "c", false),
            record("R1", "c", false),
            record("R1", "c", true),
            record("R1", "c", true),
        ];

        let by_period = summarize_by(&records, |r| &r.period);
        assert_eq!(by_period["R1"].count, 4);
        assert_eq!(by_period["R1"].correct_count, 2);
        assert_eq!(by_period["R1"].accuracy_pct, 50.0);
    }

    #[test]
    fn unseen_keys_are_not_zero_filled() {
        let records = vec![record("R1", "c", true)];
        let by_period = summarize_by(&records, |r| &r.period);
        assert_eq!(by_period.len(), 1);
        assert!(!by_period.contains_key("R2"));
    }
}
