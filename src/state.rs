use std::collections::VecDeque;

use crate::backend::{BetRecord, BetSubmission, BetsPayload, MatchRecord, MatchesPayload};
use crate::page;
use crate::status::DayBucket;

pub const SUBMIT_SUCCESS: &str = "Prediction saved";
pub const SUBMIT_MISSING_SCORES: &str = "Both predictions are required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    HomeGoals,
    AwayGoals,
}

/// Point-booster toggle. The four states cycle asymmetrically: only the two
/// disabled states lead into the pending-on state, everything else falls
/// back to plain disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoosterToggle {
    Off,
    PendingOn,
    PendingOff,
    On,
}

impl BoosterToggle {
    pub fn initial(existing_used: bool) -> Self {
        if existing_used {
            BoosterToggle::On
        } else {
            BoosterToggle::Off
        }
    }

    pub fn click(self) -> Self {
        match self {
            BoosterToggle::Off => BoosterToggle::PendingOn,
            BoosterToggle::PendingOn => BoosterToggle::PendingOff,
            BoosterToggle::PendingOff | BoosterToggle::On => BoosterToggle::Off,
        }
    }

    /// Flag submitted alongside the prediction.
    pub fn wire_flag(self) -> bool {
        matches!(self, BoosterToggle::PendingOn | BoosterToggle::On)
    }

    pub fn label(self, remaining: u32) -> String {
        match self {
            BoosterToggle::Off => format!("Disabled ({remaining} remaining)"),
            BoosterToggle::PendingOn => "Enabled (submit to confirm)".to_string(),
            BoosterToggle::PendingOff => "Disabled (submit to confirm)".to_string(),
            BoosterToggle::On => "Enabled".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Error(String),
    Success,
}

#[derive(Debug, Clone)]
pub struct FormState {
    pub home_goals: Option<u8>,
    pub away_goals: Option<u8>,
    pub booster: BoosterToggle,
    pub booster_locked: bool,
    pub submitting: bool,
    pub feedback: Option<Feedback>,
}

impl FormState {
    pub fn from_bet(existing: Option<&BetRecord>, wildcards_remaining: u32) -> Self {
        Self {
            home_goals: existing.map(|bet| bet.predicted_home_goals),
            away_goals: existing.map(|bet| bet.predicted_away_goals),
            booster: BoosterToggle::initial(existing.is_some_and(|bet| bet.use_wildcard)),
            booster_locked: wildcards_remaining == 0,
            submitting: false,
            feedback: None,
        }
    }

    pub fn click_booster(&mut self) {
        if !self.booster_locked {
            self.booster = self.booster.click();
        }
    }

    fn value_mut(&mut self, field: FocusField) -> &mut Option<u8> {
        match field {
            FocusField::HomeGoals => &mut self.home_goals,
            FocusField::AwayGoals => &mut self.away_goals,
        }
    }

    pub fn push_digit(&mut self, field: FocusField, digit: u8) {
        let slot = self.value_mut(field);
        let next = u16::from(slot.unwrap_or(0)) * 10 + u16::from(digit);
        if next <= 99 {
            *slot = Some(next as u8);
        }
    }

    pub fn pop_digit(&mut self, field: FocusField) {
        let slot = self.value_mut(field);
        *slot = match *slot {
            Some(value) if value >= 10 => Some(value / 10),
            _ => None,
        };
    }
}

#[derive(Debug, Clone)]
pub struct FixtureEntry {
    pub record: MatchRecord,
    pub my_bet: Option<BetRecord>,
    pub form: FormState,
    pub predictions_expanded: bool,
}

impl FixtureEntry {
    pub fn submission(&self) -> Option<BetSubmission> {
        let (Some(home_goals), Some(away_goals)) = (self.form.home_goals, self.form.away_goals)
        else {
            return None;
        };
        Some(BetSubmission {
            fixture_id: self.record.id,
            home_goals,
            away_goals,
            use_wildcard: self.form.booster.wire_flag(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub loading: bool,
    pub today: Vec<FixtureEntry>,
    pub tomorrow: Vec<FixtureEntry>,
    pub day: DayBucket,
    pub selected: usize,
    pub focus: FocusField,
    pub wildcards_remaining: u32,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            loading: true,
            today: Vec::new(),
            tomorrow: Vec::new(),
            day: DayBucket::Today,
            selected: 0,
            focus: FocusField::HomeGoals,
            wildcards_remaining: 0,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn entries(&self) -> &[FixtureEntry] {
        match self.day {
            DayBucket::Today => &self.today,
            DayBucket::Tomorrow => &self.tomorrow,
        }
    }

    pub fn selected_entry(&self) -> Option<&FixtureEntry> {
        self.entries().get(self.selected)
    }

    pub fn selected_entry_mut(&mut self) -> Option<&mut FixtureEntry> {
        let selected = self.selected;
        match self.day {
            DayBucket::Today => self.today.get_mut(selected),
            DayBucket::Tomorrow => self.tomorrow.get_mut(selected),
        }
    }

    pub fn entry_mut_by_match(&mut self, match_id: i64) -> Option<&mut FixtureEntry> {
        self.today
            .iter_mut()
            .chain(self.tomorrow.iter_mut())
            .find(|entry| entry.record.id == match_id)
    }

    pub fn toggle_day(&mut self) {
        self.day = match self.day {
            DayBucket::Today => DayBucket::Tomorrow,
            DayBucket::Tomorrow => DayBucket::Today,
        };
        self.selected = 0;
        self.focus = FocusField::HomeGoals;
    }

    pub fn select_next(&mut self) {
        let total = self.entries().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected + 1) % total;
        self.focus = FocusField::HomeGoals;
    }

    pub fn select_prev(&mut self) {
        let total = self.entries().len();
        if total == 0 {
            self.selected = 0;
            return;
        }
        if self.selected == 0 {
            self.selected = total - 1;
        } else {
            self.selected -= 1;
        }
        self.focus = FocusField::HomeGoals;
    }

    pub fn clamp_selection(&mut self) {
        let total = self.entries().len();
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
    }

    /// Reset to the pre-fetch state, as a full page reload would.
    pub fn begin_reload(&mut self) {
        self.loading = true;
        self.today.clear();
        self.tomorrow.clear();
        self.selected = 0;
        self.focus = FocusField::HomeGoals;
        self.wildcards_remaining = 0;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    PageLoaded {
        matches: MatchesPayload,
        bets: BetsPayload,
    },
    BetAccepted {
        match_id: i64,
    },
    BetRejected {
        match_id: i64,
        detail: String,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchPage,
    PlaceBet(BetSubmission),
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::PageLoaded { matches, bets } => {
            let wildcards_remaining = bets.num_wildcards_remaining;
            let (today, tomorrow) = page::partition(matches, &bets);
            state.push_log(format!(
                "[INFO] Page loaded: {} today, {} tomorrow",
                today.len(),
                tomorrow.len()
            ));
            state.today = today;
            state.tomorrow = tomorrow;
            state.wildcards_remaining = wildcards_remaining;
            state.loading = false;
            state.clamp_selection();
        }
        Delta::BetAccepted { match_id } => {
            if let Some(entry) = state.entry_mut_by_match(match_id) {
                entry.form.submitting = false;
                entry.form.feedback = Some(Feedback::Success);
            }
        }
        Delta::BetRejected { match_id, detail } => {
            state.push_log(format!("[WARN] Bet rejected: {detail}"));
            if let Some(entry) = state.entry_mut_by_match(match_id) {
                entry.form.submitting = false;
                entry.form.feedback = Some(Feedback::Error(detail));
            }
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
