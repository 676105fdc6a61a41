//! Grievance intake.
//!
//! Validates a citizen-submitted grievance, mints a record for it and
//! reports the submission through the advisory channel. Nothing is
//! persisted and nothing is sent upstream; the caller receives the minted
//! record and decides what to do with it.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::loggers::AdvisoryChannel;
use crate::models::{Category, Location, Platform, Record, Sentiment};

/// Districts offered by the intake form.
pub const DISTRICTS: [&str; 11] = [
    "chennai",
    "coimbatore",
    "madurai",
    "trichy",
    "salem",
    "tirunelveli",
    "vellore",
    "thanjavur",
    "kanchipuram",
    "erode",
    "other",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("grievance description must not be empty")]
    EmptyContent,

    #[error("area/neighbourhood must not be empty")]
    EmptyArea,

    #[error("unknown district {0:?}")]
    UnknownDistrict(String),
}

/// A grievance as entered in the submission form, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrievanceDraft {
    pub content: String,
    pub category: Category,
    pub district: String,
    pub area: String,
}

pub struct GrievanceIntake {
    advisory: Arc<AdvisoryChannel>,
}

impl GrievanceIntake {
    pub fn new(advisory: Arc<AdvisoryChannel>) -> Self {
        Self { advisory }
    }

    /// Validates the draft and mints a record for it.
    ///
    /// Sentiment starts as neutral; classification happens upstream, not
    /// here. Emits one advisory success notice per accepted submission.
    pub fn submit(&self, draft: GrievanceDraft) -> Result<Record, IntakeError> {
        if draft.content.trim().is_empty() {
            return Err(IntakeError::EmptyContent);
        }
        if draft.area.trim().is_empty() {
            return Err(IntakeError::EmptyArea);
        }
        let district = draft.district.to_ascii_lowercase();
        if !DISTRICTS.contains(&district.as_str()) {
            return Err(IntakeError::UnknownDistrict(draft.district));
        }

        let record = Record {
            id: Uuid::new_v4().to_string(),
            source: Platform::Direct,
            content: draft.content,
            category: draft.category,
            sentiment: Sentiment::Neutral,
            timestamp: Utc::now(),
            location: Some(Location::area_only(draft.area)),
            upvotes: Some(0),
        };

        log::info!(
            "Grievance submission recorded: id={} category={} district={}",
            record.id,
            record.category,
            district
        );
        self.advisory.success(
            "Grievance Submitted",
            Some(json!({
                "id": record.id,
                "category": record.category.label(),
                "district": district,
            })),
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loggers::NoticeLevel;

    fn draft() -> GrievanceDraft {
        GrievanceDraft {
            content: "Street lights out on Kamarajar Salai for over a week now.".to_string(),
            category: Category::Safety,
            district: "chennai".to_string(),
            area: "Marina Beach".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_mints_a_direct_record_and_advises() {
        let advisory = AdvisoryChannel::shared();
        let mut rx = advisory.subscribe();
        let intake = GrievanceIntake::new(advisory);

        let record = intake.submit(draft()).unwrap();

        assert_eq!(record.source, Platform::Direct);
        assert_eq!(record.sentiment, Sentiment::Neutral);
        assert_eq!(record.category, Category::Safety);
        assert_eq!(record.location, Some(Location::area_only("Marina Beach")));
        assert_eq!(record.upvotes, Some(0));
        assert!(!record.id.is_empty());

        let notice = rx.recv().await.unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.text, "Grievance Submitted");
    }

    #[test]
    fn submit_rejects_empty_content() {
        let intake = GrievanceIntake::new(AdvisoryChannel::shared());
        let result = intake.submit(GrievanceDraft {
            content: "   ".to_string(),
            ..draft()
        });
        assert_eq!(result.unwrap_err(), IntakeError::EmptyContent);
    }

    #[test]
    fn submit_rejects_unknown_district() {
        let intake = GrievanceIntake::new(AdvisoryChannel::shared());
        let result = intake.submit(GrievanceDraft {
            district: "atlantis".to_string(),
            ..draft()
        });
        assert_eq!(
            result.unwrap_err(),
            IntakeError::UnknownDistrict("atlantis".to_string())
        );
    }

    #[test]
    fn district_matching_is_case_insensitive() {
        let intake = GrievanceIntake::new(AdvisoryChannel::shared());
        let record = intake.submit(GrievanceDraft {
            district: "Chennai".to_string(),
            ..draft()
        });
        assert!(record.is_ok());
    }

    #[test]
    fn minted_ids_are_unique() {
        let intake = GrievanceIntake::new(AdvisoryChannel::shared());
        let a = intake.submit(draft()).unwrap();
        let b = intake.submit(draft()).unwrap();
        assert_ne!(a.id, b.id);
    }
}
