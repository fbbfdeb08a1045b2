use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a GTFS service time of day in "HH:MM:SS" form. hours may exceed 23 for
/// service past midnight of the service day.
///
/// values are normalized to a fixed-width, zero-padded two-digit hour on
/// construction, so ordering the underlying text is the same as ordering
/// chronologically. GTFS permits "H:MM:SS" for hours below ten; "8:05:00"
/// becomes "08:05:00". hours with more than two digits are rejected since they
/// would break the fixed width.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScheduleTime(String);

impl ScheduleTime {
    pub fn parse(value: &str) -> Result<ScheduleTime, String> {
        let trimmed = value.trim();
        let mut parts = trimmed.split(':');
        let (hours, minutes, seconds) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return Err(format!("time '{value}' is not in HH:MM:SS format")),
        };
        if hours.is_empty() || hours.len() > 2 || !is_digits(hours) {
            return Err(format!("time '{value}' has an invalid hour field"));
        }
        if !is_sexagesimal(minutes) {
            return Err(format!("time '{value}' has an invalid minute field"));
        }
        if !is_sexagesimal(seconds) {
            return Err(format!("time '{value}' has an invalid second field"));
        }
        Ok(ScheduleTime(format!("{hours:0>2}:{minutes}:{seconds}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// two digits, 00 through 59
fn is_sexagesimal(s: &str) -> bool {
    s.len() == 2 && is_digits(s) && s.as_bytes()[0] <= b'5'
}

impl TryFrom<String> for ScheduleTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ScheduleTime::parse(&value)
    }
}

impl From<ScheduleTime> for String {
    fn from(value: ScheduleTime) -> Self {
        value.0
    }
}

impl Display for ScheduleTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
