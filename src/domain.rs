use std::fmt;

use compact_str::{CompactString, format_compact};
use serde::Deserialize;

use crate::result::{Result, WatchError};

/// Review states the homework service is known to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl ReviewStatus {
    /// Resolve a wire status code against the catalog
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Self::Approved),
            "reviewing" => Some(Self::Reviewing),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Wire code for this status
    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict shown to the user
    pub fn verdict(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One homework entry as returned by the status endpoint
///
/// Deserialized leniently: absent fields become `None` so that shape problems
/// surface as reportable errors instead of deserializer failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HomeworkRecord {
    #[serde(default)]
    pub homework_name: Option<CompactString>,
    #[serde(default)]
    pub status: Option<CompactString>,
}

/// A review status change ready to be announced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub status: ReviewStatus,
    pub message: CompactString,
}

impl HomeworkRecord {
    /// Render the user-facing status line for this record
    pub fn review_update(&self) -> Result<ReviewUpdate> {
        let name = self
            .homework_name
            .as_ref()
            .ok_or_else(|| WatchError::unknown_status("Record is missing `homework_name`"))?;
        let code = self
            .status
            .as_ref()
            .ok_or_else(|| WatchError::unknown_status("Record is missing `status`"))?;
        let status = ReviewStatus::from_code(code).ok_or_else(|| {
            WatchError::unknown_status(format_compact!(
                "Status `{code}` is not in the verdict catalog"
            ))
        })?;

        Ok(ReviewUpdate {
            status,
            message: format_compact!(
                "Изменился статус проверки работы \"{name}\": {}",
                status.verdict()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::ErrorKind;

    fn record(name: &str, status: &str) -> HomeworkRecord {
        HomeworkRecord {
            homework_name: Some(name.into()),
            status: Some(status.into()),
        }
    }

    #[test]
    fn renders_the_exact_status_line() {
        let update = record("hw1", "reviewing").review_update().unwrap();
        assert_eq!(update.status, ReviewStatus::Reviewing);
        assert_eq!(
            update.message,
            "Изменился статус проверки работы \"hw1\": Работа взята на проверку ревьюером."
        );
    }

    #[test]
    fn each_catalog_status_has_its_own_verdict() {
        let approved = record("hw1", "approved").review_update().unwrap();
        let rejected = record("hw1", "rejected").review_update().unwrap();
        assert_eq!(
            approved.message,
            "Изменился статус проверки работы \"hw1\": Работа проверена: ревьюеру всё понравилось. Ура!"
        );
        assert_eq!(
            rejected.message,
            "Изменился статус проверки работы \"hw1\": Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn unlisted_status_code_is_rejected() {
        let error = record("hw1", "burned").review_update().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnknownStatus);
    }

    #[test]
    fn record_without_name_or_status_is_rejected() {
        let nameless = HomeworkRecord {
            homework_name: None,
            status: Some("approved".into()),
        };
        assert_eq!(nameless.review_update().unwrap_err().kind(), ErrorKind::UnknownStatus);

        let statusless = HomeworkRecord {
            homework_name: Some("hw1".into()),
            status: None,
        };
        assert_eq!(statusless.review_update().unwrap_err().kind(), ErrorKind::UnknownStatus);
    }

    #[test]
    fn catalog_resolves_only_known_codes() {
        assert_eq!(ReviewStatus::from_code("approved"), Some(ReviewStatus::Approved));
        assert_eq!(ReviewStatus::from_code("draft"), None);
    }
}
