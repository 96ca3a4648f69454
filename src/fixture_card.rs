use chrono::{Local, NaiveDateTime, TimeZone};

use crate::backend::BetRecord;
use crate::bet_form;
use crate::state::FixtureEntry;
use crate::status::{DayBucket, MatchStatus};
use crate::view::Node;

pub const SHOW_PREDICTIONS: &str = "Show User Predictions";
pub const HIDE_PREDICTIONS: &str = "Hide User Predictions";
pub const REGULAR_TIME_NOTE: &str = "End of regular time";

/// Build the full visual block for one fixture: phase label, team identities
/// around the score divider, other users' predictions and the bet form.
pub fn fixture_card(entry: &FixtureEntry, day: DayBucket, wildcards_remaining: u32) -> Node {
    let record = &entry.record;

    let mut card = Node::block("fixture-info");
    if record.status.is_ongoing() {
        card = card.with_class("ongoing");
    } else if !record.can_users_place_bets {
        card = card.with_class("disabled");
    }

    let label = record
        .status
        .phase_label(kickoff_local(record.timestamp), day);
    card = card.child(Node::text(label, "fixture-time"));

    if let Some(league) = &record.league_name {
        card = card.child(Node::text(league.clone(), "league-name"));
    }

    let teams = Node::block("teams-info")
        .child(team_details(&record.home_team_name, &record.home_team_logo))
        .child(divider(
            record.home_team_goals,
            record.away_team_goals,
            record.status,
        ))
        .child(team_details(&record.away_team_name, &record.away_team_logo));
    card = card.child(teams);

    if !record.bets.is_empty() {
        card = card.child(predictions_block(&record.bets, entry.predictions_expanded));
    }

    card.child(bet_form::bet_form(entry, wildcards_remaining))
}

fn team_details(name: &str, logo: &str) -> Node {
    Node::block("team-info")
        .child(Node::image(logo, name, "team-logo"))
        .child(Node::text(name, "team-name"))
}

/// "VS" until both goal counts exist, the score afterwards. Past regular
/// time the displayed score is the regulation-time one, which gets called
/// out next to it.
fn divider(home_goals: Option<u8>, away_goals: Option<u8>, status: MatchStatus) -> Node {
    let (Some(home), Some(away)) = (home_goals, away_goals) else {
        return Node::text("VS", "fixture-scores");
    };
    let mut node = Node::text(format!("{home} - {away}"), "fixture-scores");
    if status.beyond_regular_time() {
        node = node.child(Node::text(REGULAR_TIME_NOTE, "score-note"));
    }
    node
}

fn predictions_block(bets: &[BetRecord], expanded: bool) -> Node {
    let toggle_label = if expanded {
        HIDE_PREDICTIONS
    } else {
        SHOW_PREDICTIONS
    };
    let rows = bets
        .iter()
        .map(|bet| {
            vec![
                bet.user
                    .as_ref()
                    .map(|user| user.name.clone())
                    .unwrap_or_default(),
                bet.predicted_home_goals.to_string(),
                bet.predicted_away_goals.to_string(),
                if bet.use_wildcard { "Yes" } else { "No" }.to_string(),
            ]
        })
        .collect();
    let mut table = Node::table(
        &["Player", "Home", "Away", "Booster"],
        rows,
        "predictions-table",
    );
    if !expanded {
        table = table.with_class("hidden");
    }
    Node::block("user-predictions")
        .child(Node::button(toggle_label, false, "predictions-toggle"))
        .child(table)
}

fn kickoff_local(timestamp: i64) -> NaiveDateTime {
    Local
        .timestamp_opt(timestamp, 0)
        .single()
        .map(|kickoff| kickoff.naive_local())
        .unwrap_or_default()
}
