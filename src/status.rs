use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Short status codes as delivered by the fixtures feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "NS")]
    NotStarted,
    #[serde(rename = "TBD")]
    TimeToBeDecided,
    #[serde(rename = "1H")]
    FirstHalf,
    #[serde(rename = "HT")]
    HalfTime,
    #[serde(rename = "2H")]
    SecondHalf,
    #[serde(rename = "ET")]
    ExtraTime,
    #[serde(rename = "BT")]
    BreakTime,
    #[serde(rename = "P")]
    Penalties,
    #[serde(rename = "INT")]
    Interrupted,
    #[serde(rename = "FT")]
    FullTime,
    #[serde(rename = "AET")]
    AfterExtraTime,
    #[serde(rename = "PEN")]
    AfterPenalties,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayBucket {
    Today,
    Tomorrow,
}

impl DayBucket {
    pub fn word(self) -> &'static str {
        match self {
            DayBucket::Today => "Today",
            DayBucket::Tomorrow => "Tomorrow",
        }
    }
}

impl MatchStatus {
    /// In-play statuses. These suppress the closed-betting style even though
    /// betting is closed while they last.
    pub fn is_ongoing(self) -> bool {
        matches!(
            self,
            MatchStatus::FirstHalf
                | MatchStatus::SecondHalf
                | MatchStatus::ExtraTime
                | MatchStatus::HalfTime
        )
    }

    /// Statuses where the feed reports the regulation-time score rather than
    /// the running one.
    pub fn beyond_regular_time(self) -> bool {
        matches!(
            self,
            MatchStatus::ExtraTime
                | MatchStatus::BreakTime
                | MatchStatus::Penalties
                | MatchStatus::AfterExtraTime
                | MatchStatus::AfterPenalties
        )
    }

    pub fn phase_label(self, kickoff: NaiveDateTime, day: DayBucket) -> String {
        match self {
            MatchStatus::NotStarted => {
                format!("{} {}", day.word(), kickoff.format("%H:%M"))
            }
            MatchStatus::TimeToBeDecided => "Time To Be Decided".to_string(),
            MatchStatus::FirstHalf => "First Half".to_string(),
            MatchStatus::HalfTime => "Half Time".to_string(),
            MatchStatus::SecondHalf => "Second Half".to_string(),
            MatchStatus::ExtraTime => "Extra Time".to_string(),
            MatchStatus::BreakTime => "Break Time (Extra Time)".to_string(),
            MatchStatus::Penalties => "Penalties".to_string(),
            MatchStatus::Interrupted => "Match Interrupted".to_string(),
            MatchStatus::FullTime => "Full Time".to_string(),
            MatchStatus::AfterExtraTime => "Ended After Extra Time".to_string(),
            MatchStatus::AfterPenalties => "Ended After Penalties".to_string(),
            MatchStatus::Unknown => "Status Unknown".to_string(),
        }
    }
}
