use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use crate::util::DateTimeUtils;

pub type SurveyId = u32;
pub type RoadId = u32;
pub type UserId = u32;

/// Point in time as carried on the wire: seconds since the Unix epoch plus a
/// sub-second nanosecond part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;

        DateTimeUtils::to_utc(self.seconds, nanos)
    }

    pub fn to_display(&self) -> Option<String> {
        let nanos = u32::try_from(self.nanos).ok()?;

        DateTimeUtils::timestamp_to_str(self.seconds, nanos)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self {
            seconds: datetime.timestamp(),
            nanos: datetime.timestamp_subsec_nanos() as i32,
        }
    }
}

/// A field-collected record of road attribute data over a chainage interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: SurveyId,
    pub road_id: RoadId,
    pub road_code: String,
    pub user: UserId,
    pub source: String,
    pub date_updated: Option<Timestamp>,
    pub date_surveyed: Option<Timestamp>,
    pub chainage_start: f32,
    pub chainage_end: f32,
    pub values: String,
    pub added_by: String,
}

/// Surveys in wire order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Surveys {
    pub surveys: Vec<Survey>,
}

impl Surveys {
    pub fn len(&self) -> usize {
        self.surveys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surveys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Survey> {
        self.surveys.iter()
    }
}

impl FromIterator<Survey> for Surveys {
    fn from_iter<I: IntoIterator<Item = Survey>>(iter: I) -> Self {
        Self {
            surveys: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Surveys {
    type Item = Survey;
    type IntoIter = std::vec::IntoIter<Survey>;

    fn into_iter(self) -> Self::IntoIter {
        self.surveys.into_iter()
    }
}

impl<'a> IntoIterator for &'a Surveys {
    type Item = &'a Survey;
    type IntoIter = std::slice::Iter<'a, Survey>;

    fn into_iter(self) -> Self::IntoIter {
        self.surveys.iter()
    }
}
