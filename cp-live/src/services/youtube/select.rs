//! Choosing one broadcast when a channel reports several at once.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use youtube_data::VideoListResponse;

/// A broadcast reported by the channel search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub video_id: String,
    pub scheduled_start: Option<DateTime<Utc>>,
}

impl Candidate {
    /// One candidate per searched id, in search order.
    ///
    /// The detail lookup may list items in any order, so start times are
    /// matched by id. Ids missing from `details` have no scheduled start.
    pub fn in_search_order(video_ids: &[&str], details: &VideoListResponse) -> Vec<Self> {
        let mut starts: HashMap<&str, Option<DateTime<Utc>>> = HashMap::new();
        for item in details.items.iter().filter(|item| !item.id.is_empty()) {
            starts.entry(item.id.as_str()).or_insert_with(|| item.scheduled_start());
        }

        video_ids
            .iter()
            .map(|id| Self {
                video_id: (*id).to_string(),
                scheduled_start: starts.get(id).copied().flatten(),
            })
            .collect()
    }
}

/// The candidate with the earliest scheduled start.
///
/// Candidates without a scheduled start are skipped; on equal start times
/// the first one in search order wins.
pub fn select_earliest(candidates: &[Candidate]) -> Option<&Candidate> {
    let mut best: Option<(&Candidate, DateTime<Utc>)> = None;
    for candidate in candidates {
        let Some(start) = candidate.scheduled_start else {
            continue;
        };
        if best.is_none_or(|(_, best_start)| start < best_start) {
            best = Some((candidate, start));
        }
    }
    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const T: i64 = 1_714_557_600;

    fn candidate(id: &str, offset: Option<i64>) -> Candidate {
        Candidate {
            video_id: id.to_string(),
            scheduled_start: offset.map(|o| Utc.timestamp_opt(T + o, 0).unwrap()),
        }
    }

    #[test]
    fn earliest_scheduled_wins() {
        let candidates = [
            candidate("A", Some(300)),
            candidate("B", Some(100)),
            candidate("C", None),
        ];
        assert_eq!(select_earliest(&candidates).unwrap().video_id, "B");
    }

    #[test]
    fn no_schedule_yields_none() {
        let candidates = [candidate("A", None), candidate("B", None)];
        assert!(select_earliest(&candidates).is_none());
        assert!(select_earliest(&[]).is_none());
    }

    #[test]
    fn ties_keep_first_seen() {
        let candidates = [
            candidate("A", Some(50)),
            candidate("B", Some(50)),
            candidate("C", Some(80)),
        ];
        assert_eq!(select_earliest(&candidates).unwrap().video_id, "A");
    }

    #[test]
    fn candidates_follow_search_order() {
        let body = r#"{"items": [
            {"id": "B", "liveStreamingDetails": {"scheduledStartTime": "bogus"}},
            {"id": "", "liveStreamingDetails": {"scheduledStartTime": "2024-05-01T09:00:00Z"}},
            {"id": "A", "liveStreamingDetails": {"scheduledStartTime": "2024-05-01T10:05:00Z"}}
        ]}"#;
        let response = VideoListResponse::from_json(body).unwrap();
        let candidates = Candidate::in_search_order(&["A", "B", "C"], &response);

        let ids: Vec<_> = candidates.iter().map(|c| c.video_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(candidates[0].scheduled_start.unwrap().timestamp(), T + 300);
        assert!(candidates[1].scheduled_start.is_none());
        assert!(candidates[2].scheduled_start.is_none());
    }

    #[test]
    fn reordered_details_keep_search_order_on_ties() {
        let body = r#"{"items": [
            {"id": "B", "liveStreamingDetails": {"scheduledStartTime": "2024-05-01T10:00:00Z"}},
            {"id": "A", "liveStreamingDetails": {"scheduledStartTime": "2024-05-01T10:00:00Z"}}
        ]}"#;
        let response = VideoListResponse::from_json(body).unwrap();
        let candidates = Candidate::in_search_order(&["A", "B"], &response);
        assert_eq!(select_earliest(&candidates).unwrap().video_id, "A");
    }
}
