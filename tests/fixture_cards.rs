use matchday_terminal::backend::{BetRecord, BetUser, MatchRecord};
use matchday_terminal::fixture_card::{
    HIDE_PREDICTIONS, REGULAR_TIME_NOTE, SHOW_PREDICTIONS, fixture_card,
};
use matchday_terminal::state::{FixtureEntry, FormState};
use matchday_terminal::status::{DayBucket, MatchStatus};
use matchday_terminal::view::NodeKind;

fn match_record(status: MatchStatus, can_bet: bool) -> MatchRecord {
    MatchRecord {
        id: 10,
        home_team_name: "Newcastle".to_string(),
        away_team_name: "Everton".to_string(),
        home_team_logo: "https://media.example.com/teams/34.png".to_string(),
        away_team_logo: "https://media.example.com/teams/45.png".to_string(),
        home_team_goals: None,
        away_team_goals: None,
        status,
        timestamp: 1718445600,
        can_users_place_bets: can_bet,
        show: true,
        league_name: Some("Premier League".to_string()),
        bets: Vec::new(),
    }
}

fn entry(record: MatchRecord) -> FixtureEntry {
    let form = FormState::from_bet(None, 2);
    FixtureEntry {
        record,
        my_bet: None,
        form,
        predictions_expanded: false,
    }
}

fn other_bet(name: &str, home: u8, away: u8, wildcard: bool) -> BetRecord {
    BetRecord {
        match_id: 10,
        predicted_home_goals: home,
        predicted_away_goals: away,
        use_wildcard: wildcard,
        user: Some(BetUser {
            name: name.to_string(),
        }),
    }
}

#[test]
fn divider_shows_vs_until_both_scores_exist() {
    let card = fixture_card(&entry(match_record(MatchStatus::NotStarted, true)), DayBucket::Today, 2);
    let divider = card.find("fixture-scores").expect("divider should exist");
    assert_eq!(divider.as_text(), Some("VS"));

    let mut half_scored = match_record(MatchStatus::Interrupted, false);
    half_scored.home_team_goals = Some(1);
    let card = fixture_card(&entry(half_scored), DayBucket::Today, 2);
    let divider = card.find("fixture-scores").expect("divider should exist");
    assert_eq!(divider.as_text(), Some("VS"));
}

#[test]
fn divider_shows_the_score_when_present() {
    let mut record = match_record(MatchStatus::FullTime, false);
    record.home_team_goals = Some(2);
    record.away_team_goals = Some(1);
    let card = fixture_card(&entry(record), DayBucket::Today, 2);
    let divider = card.find("fixture-scores").expect("divider should exist");
    assert_eq!(divider.as_text(), Some("2 - 1"));
    assert!(divider.find("score-note").is_none());
}

#[test]
fn regulation_time_note_rides_along_past_regular_time() {
    let mut record = match_record(MatchStatus::AfterExtraTime, false);
    record.home_team_goals = Some(1);
    record.away_team_goals = Some(1);
    let card = fixture_card(&entry(record), DayBucket::Today, 2);
    let note = card.find("score-note").expect("note should exist");
    assert_eq!(note.as_text(), Some(REGULAR_TIME_NOTE));

    // Extra time with no score yet still renders plain VS.
    let card = fixture_card(&entry(match_record(MatchStatus::ExtraTime, false)), DayBucket::Today, 2);
    assert!(card.find("score-note").is_none());
}

#[test]
fn ongoing_statuses_override_the_disabled_style() {
    let card = fixture_card(&entry(match_record(MatchStatus::FirstHalf, false)), DayBucket::Today, 2);
    assert!(card.has_class("ongoing"));
    assert!(!card.has_class("disabled"));

    let card = fixture_card(&entry(match_record(MatchStatus::FullTime, false)), DayBucket::Today, 2);
    assert!(card.has_class("disabled"));
    assert!(!card.has_class("ongoing"));

    let card = fixture_card(&entry(match_record(MatchStatus::NotStarted, true)), DayBucket::Today, 2);
    assert!(!card.has_class("disabled"));
    assert!(!card.has_class("ongoing"));
}

#[test]
fn team_blocks_keep_home_left_and_away_right() {
    let card = fixture_card(&entry(match_record(MatchStatus::NotStarted, true)), DayBucket::Today, 2);
    let teams = card.find("teams-info").expect("teams block should exist");
    let mut names = Vec::new();
    teams.find_all("team-name", &mut names);
    let names: Vec<_> = names.iter().filter_map(|n| n.as_text()).collect();
    assert_eq!(names, vec!["Newcastle", "Everton"]);

    let mut logos = Vec::new();
    teams.find_all("team-logo", &mut logos);
    assert!(matches!(
        &logos[0].kind,
        NodeKind::Image { alt, .. } if alt == "Newcastle"
    ));
}

#[test]
fn league_line_appears_only_when_named() {
    let card = fixture_card(&entry(match_record(MatchStatus::NotStarted, true)), DayBucket::Today, 2);
    assert_eq!(
        card.find("league-name").and_then(|n| n.as_text()),
        Some("Premier League")
    );

    let mut record = match_record(MatchStatus::NotStarted, true);
    record.league_name = None;
    let card = fixture_card(&entry(record), DayBucket::Today, 2);
    assert!(card.find("league-name").is_none());
}

#[test]
fn predictions_table_is_hidden_behind_the_toggle() {
    let mut record = match_record(MatchStatus::FullTime, false);
    record.home_team_goals = Some(2);
    record.away_team_goals = Some(1);
    record.bets = vec![
        other_bet("ines", 2, 0, false),
        other_bet("marco", 1, 1, true),
        other_bet("petra", 2, 1, false),
    ];
    let card = fixture_card(&entry(record.clone()), DayBucket::Today, 2);

    let toggle = card
        .find("predictions-toggle")
        .expect("toggle should exist");
    assert!(matches!(
        &toggle.kind,
        NodeKind::Button { label, disabled: false } if label == SHOW_PREDICTIONS
    ));
    let table = card
        .find("predictions-table")
        .expect("table should exist");
    assert!(table.has_class("hidden"));
    match &table.kind {
        NodeKind::Table { header, rows } => {
            assert_eq!(header.len(), 4);
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[1], vec!["marco", "1", "1", "Yes"]);
            assert_eq!(rows[2], vec!["petra", "2", "1", "No"]);
        }
        other => panic!("expected a table, got {other:?}"),
    }

    // Expanding flips both the label and the visibility.
    let mut expanded = entry(record);
    expanded.predictions_expanded = true;
    let card = fixture_card(&expanded, DayBucket::Today, 2);
    let toggle = card
        .find("predictions-toggle")
        .expect("toggle should exist");
    assert!(matches!(
        &toggle.kind,
        NodeKind::Button { label, .. } if label == HIDE_PREDICTIONS
    ));
    let table = card
        .find("predictions-table")
        .expect("table should exist");
    assert!(!table.has_class("hidden"));
}

#[test]
fn no_predictions_block_without_embedded_bets() {
    let card = fixture_card(&entry(match_record(MatchStatus::NotStarted, true)), DayBucket::Today, 2);
    assert!(card.find("user-predictions").is_none());
}

#[test]
fn scheduled_card_label_names_the_day_bucket() {
    let card = fixture_card(&entry(match_record(MatchStatus::NotStarted, true)), DayBucket::Tomorrow, 2);
    let label = card
        .find("fixture-time")
        .and_then(|n| n.as_text())
        .expect("label should exist");
    assert!(label.starts_with("Tomorrow "), "got {label}");
}
