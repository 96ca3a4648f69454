use matchday_terminal::backend::{BetRecord, MatchRecord};
use matchday_terminal::bet_form::{
    MATCH_ENDED, MATCH_STARTED, PREDICT_SCORE, UPDATE_PREDICTION, bet_form,
};
use matchday_terminal::state::{
    BoosterToggle, Feedback, FixtureEntry, FormState, SUBMIT_SUCCESS,
};
use matchday_terminal::status::MatchStatus;
use matchday_terminal::view::{Node, NodeKind};

fn match_record(status: MatchStatus, can_bet: bool) -> MatchRecord {
    MatchRecord {
        id: 77,
        home_team_name: "Arsenal".to_string(),
        away_team_name: "Chelsea".to_string(),
        home_team_logo: String::new(),
        away_team_logo: String::new(),
        home_team_goals: None,
        away_team_goals: None,
        status,
        timestamp: 1718470800,
        can_users_place_bets: can_bet,
        show: true,
        league_name: None,
        bets: Vec::new(),
    }
}

fn my_bet(home: u8, away: u8, wildcard: bool) -> BetRecord {
    BetRecord {
        match_id: 77,
        predicted_home_goals: home,
        predicted_away_goals: away,
        use_wildcard: wildcard,
        user: None,
    }
}

fn entry(record: MatchRecord, bet: Option<BetRecord>, remaining: u32) -> FixtureEntry {
    let form = FormState::from_bet(bet.as_ref(), remaining);
    FixtureEntry {
        record,
        my_bet: bet,
        form,
        predictions_expanded: false,
    }
}

fn input_value(form: &Node, input_name: &str) -> Option<u8> {
    let mut inputs = Vec::new();
    form.find_all("goal-input", &mut inputs);
    inputs.iter().find_map(|node| match &node.kind {
        NodeKind::NumberInput { name, value, .. } if name == input_name => Some(*value),
        _ => None,
    })?
}

fn button<'a>(form: &'a Node, class: &str) -> (&'a str, bool) {
    let node = form.find(class).expect("button should exist");
    match &node.kind {
        NodeKind::Button { label, disabled } => (label.as_str(), *disabled),
        other => panic!("expected a button, got {other:?}"),
    }
}

#[test]
fn empty_form_offers_predict_score() {
    let form = bet_form(&entry(match_record(MatchStatus::NotStarted, true), None, 2), 2);
    assert!(!form.has_class("disabled"));
    assert_eq!(input_value(&form, "home_goals"), None);
    assert_eq!(input_value(&form, "away_goals"), None);
    let (label, disabled) = button(&form, "submit-bet");
    assert_eq!(label, PREDICT_SCORE);
    assert!(!disabled);
}

#[test]
fn existing_bet_prefills_and_offers_update() {
    let form = bet_form(
        &entry(
            match_record(MatchStatus::NotStarted, true),
            Some(my_bet(2, 1, false)),
            2,
        ),
        2,
    );
    assert_eq!(input_value(&form, "home_goals"), Some(2));
    assert_eq!(input_value(&form, "away_goals"), Some(1));
    let (label, _) = button(&form, "submit-bet");
    assert_eq!(label, UPDATE_PREDICTION);
}

#[test]
fn hidden_field_always_carries_the_fixture_id() {
    let form = bet_form(&entry(match_record(MatchStatus::NotStarted, true), None, 2), 2);
    let hidden = form
        .children
        .iter()
        .find_map(|node| match &node.kind {
            NodeKind::Hidden { name, value } if name == "fixture_id" => Some(value.clone()),
            _ => None,
        })
        .expect("hidden fixture id should exist");
    assert_eq!(hidden, "77");
}

#[test]
fn placeholders_name_each_team() {
    let form = bet_form(&entry(match_record(MatchStatus::NotStarted, true), None, 2), 2);
    let mut inputs = Vec::new();
    form.find_all("goal-input", &mut inputs);
    let placeholders: Vec<&str> = inputs
        .iter()
        .filter_map(|node| match &node.kind {
            NodeKind::NumberInput { placeholder, .. } => Some(placeholder.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        placeholders,
        vec![
            "Your Prediction for Arsenal",
            "Your Prediction for Chelsea"
        ]
    );
}

#[test]
fn finished_match_disables_everything_with_match_ended() {
    let form = bet_form(
        &entry(
            match_record(MatchStatus::FullTime, false),
            Some(my_bet(1, 0, false)),
            2,
        ),
        2,
    );
    assert!(form.has_class("disabled"));
    let (label, disabled) = button(&form, "submit-bet");
    assert_eq!(label, MATCH_ENDED);
    assert!(disabled);

    let mut inputs = Vec::new();
    form.find_all("goal-input", &mut inputs);
    assert!(inputs.iter().all(|node| matches!(
        &node.kind,
        NodeKind::NumberInput { disabled: true, .. }
    )));
    let (_, booster_disabled) = button(&form, "wildcard-toggle");
    assert!(booster_disabled);
}

#[test]
fn started_match_uses_the_generic_closed_label() {
    let form = bet_form(&entry(match_record(MatchStatus::FirstHalf, false), None, 2), 2);
    let (label, disabled) = button(&form, "submit-bet");
    assert_eq!(label, MATCH_STARTED);
    assert!(disabled);
}

#[test]
fn submitting_disables_the_control_but_keeps_its_label() {
    let mut e = entry(
        match_record(MatchStatus::NotStarted, true),
        Some(my_bet(2, 1, false)),
        2,
    );
    e.form.submitting = true;
    let form = bet_form(&e, 2);
    let (label, disabled) = button(&form, "submit-bet");
    assert_eq!(label, UPDATE_PREDICTION);
    assert!(disabled);
}

#[test]
fn feedback_renders_error_detail_verbatim() {
    let mut e = entry(match_record(MatchStatus::NotStarted, true), None, 2);
    e.form.feedback = Some(Feedback::Error(
        "Match has started - you can no longer place bets on this match".to_string(),
    ));
    let form = bet_form(&e, 2);
    let error = form.find("bet-error").expect("error region should exist");
    assert_eq!(
        error.as_text(),
        Some("Match has started - you can no longer place bets on this match")
    );
    assert!(form.find("bet-success").is_none());
}

#[test]
fn feedback_renders_the_fixed_success_message() {
    let mut e = entry(match_record(MatchStatus::NotStarted, true), None, 2);
    e.form.feedback = Some(Feedback::Success);
    let form = bet_form(&e, 2);
    let success = form.find("bet-success").expect("success region should exist");
    assert_eq!(success.as_text(), Some(SUBMIT_SUCCESS));
}

#[test]
fn booster_cycle_is_asymmetric() {
    // Disabled -> pending-on -> pending-off -> disabled.
    assert_eq!(BoosterToggle::Off.click(), BoosterToggle::PendingOn);
    assert_eq!(BoosterToggle::PendingOn.click(), BoosterToggle::PendingOff);
    assert_eq!(BoosterToggle::PendingOff.click(), BoosterToggle::Off);
    // An active booster drops straight back to disabled.
    assert_eq!(BoosterToggle::On.click(), BoosterToggle::Off);
}

#[test]
fn booster_labels_match_each_state() {
    assert_eq!(BoosterToggle::Off.label(2), "Disabled (2 remaining)");
    assert_eq!(
        BoosterToggle::PendingOn.label(2),
        "Enabled (submit to confirm)"
    );
    assert_eq!(
        BoosterToggle::PendingOff.label(2),
        "Disabled (submit to confirm)"
    );
    assert_eq!(BoosterToggle::On.label(2), "Enabled");
}

#[test]
fn booster_wire_flag_covers_both_enabled_states() {
    assert!(!BoosterToggle::Off.wire_flag());
    assert!(BoosterToggle::PendingOn.wire_flag());
    assert!(!BoosterToggle::PendingOff.wire_flag());
    assert!(BoosterToggle::On.wire_flag());
}

#[test]
fn booster_starts_from_the_existing_bet() {
    assert_eq!(BoosterToggle::initial(false), BoosterToggle::Off);
    assert_eq!(BoosterToggle::initial(true), BoosterToggle::On);
}

#[test]
fn booster_locks_when_no_wildcards_remain() {
    let mut form = FormState::from_bet(None, 0);
    assert!(form.booster_locked);
    form.click_booster();
    assert_eq!(form.booster, BoosterToggle::Off);

    let rendered = bet_form(&entry(match_record(MatchStatus::NotStarted, true), None, 0), 0);
    let (label, disabled) = button(&rendered, "wildcard-toggle");
    assert_eq!(label, "Disabled (0 remaining)");
    assert!(disabled);
}
