//! Class schedule.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClassId, EnrollmentId, MemberId, Timestamp};

/// A recurring weekly class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymClass {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub instructor: Option<String>,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    pub capacity: u32,
}

impl GymClass {
    /// True while fewer than `capacity` members are enrolled.
    pub fn has_capacity(&self, enrolled: u32) -> bool {
        enrolled < self.capacity
    }

    pub fn spots_left(&self, enrolled: u32) -> u32 {
        self.capacity.saturating_sub(enrolled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEnrollment {
    pub id: EnrollmentId,
    pub class_id: ClassId,
    pub member_id: MemberId,
    pub enrolled_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yoga(capacity: u32) -> GymClass {
        GymClass {
            id: ClassId::new(),
            name: "Yoga".to_string(),
            instructor: None,
            day_of_week: Weekday::Mon,
            start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            duration_minutes: 60,
            capacity,
        }
    }

    #[test]
    fn full_class_has_no_capacity() {
        assert!(yoga(12).has_capacity(11));
        assert!(!yoga(12).has_capacity(12));
    }

    #[test]
    fn spots_left_never_underflows() {
        assert_eq!(yoga(10).spots_left(14), 0);
        assert_eq!(yoga(10).spots_left(4), 6);
    }
}
