use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Achievement,
    Course,
    Certificate,
    System,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Achievement => "achievement",
            Self::Course => "course",
            Self::Certificate => "certificate",
            Self::System => "system",
        }
    }
}

impl FromStr for NotificationCategory {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "achievement" => Ok(Self::Achievement),
            "course" => Ok(Self::Course),
            "certificate" => Ok(Self::Certificate),
            "system" => Ok(Self::System),
            _ => Err(CoreError::InvalidCategory {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// One user-facing alert. `id` is unique within the list currently held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    /// Human-readable relative timestamp, e.g. "2 hours ago".
    pub time: String,
    pub read: bool,
    pub icon: String,
}

impl NotificationRecord {
    pub fn is_unread(&self) -> bool {
        !self.read
    }

    /// Sets the read flag. There is no inverse.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

/// The fixed set shown when no backend is reachable or nobody is signed in.
pub fn fallback_set() -> Vec<NotificationRecord> {
    vec![
        NotificationRecord {
            id: 1,
            category: NotificationCategory::Achievement,
            title: "Course Completed!".to_string(),
            message: "You completed \"UI/UX Design Fundamentals\"".to_string(),
            time: "2 hours ago".to_string(),
            read: false,
            icon: "🎉".to_string(),
        },
        NotificationRecord {
            id: 2,
            category: NotificationCategory::Course,
            title: "New Course Available".to_string(),
            message: "Phishing and Scam Alert Training is now available".to_string(),
            time: "5 hours ago".to_string(),
            read: false,
            icon: "🎣".to_string(),
        },
        NotificationRecord {
            id: 3,
            category: NotificationCategory::Certificate,
            title: "Certificate Ready".to_string(),
            message: "Your OSHA certification is ready to download".to_string(),
            time: "1 day ago".to_string(),
            read: false,
            icon: "📜".to_string(),
        },
    ]
}
