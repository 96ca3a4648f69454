use crate::state::{Feedback, FixtureEntry, SUBMIT_SUCCESS};
use crate::status::MatchStatus;
use crate::view::Node;

pub const PREDICT_SCORE: &str = "Predict Score";
pub const UPDATE_PREDICTION: &str = "Update Prediction";
pub const MATCH_ENDED: &str = "Match Ended";
pub const MATCH_STARTED: &str = "Match Started - Cannot Update Prediction Anymore";

/// Build the prediction form for one fixture from its current form state.
pub fn bet_form(entry: &FixtureEntry, wildcards_remaining: u32) -> Node {
    let record = &entry.record;
    let closed = !record.can_users_place_bets;

    let mut form = Node::block("bet-form");
    if closed {
        form = form.with_class("disabled");
    }

    form = form
        .child(goal_input(
            "home_goals",
            entry.form.home_goals,
            &record.home_team_name,
            closed,
        ))
        .child(goal_input(
            "away_goals",
            entry.form.away_goals,
            &record.away_team_name,
            closed,
        ))
        .child(Node::hidden("fixture_id", record.id.to_string()));

    form = form.child(Node::button(
        entry.form.booster.label(wildcards_remaining),
        closed || entry.form.booster_locked,
        "wildcard-toggle",
    ));

    let (label, disabled) = submit_control(
        closed,
        record.status,
        entry.my_bet.is_some(),
        entry.form.submitting,
    );
    form = form.child(Node::button(label, disabled, "submit-bet"));

    match &entry.form.feedback {
        Some(Feedback::Error(detail)) => {
            form = form.child(Node::text(detail.clone(), "bet-error"));
        }
        Some(Feedback::Success) => {
            form = form.child(Node::text(SUBMIT_SUCCESS, "bet-success"));
        }
        None => {}
    }

    form
}

/// Label and disabled flag for the submit control. While a submission is in
/// flight only the flag changes; the label is restored untouched.
pub fn submit_control(
    closed: bool,
    status: MatchStatus,
    has_bet: bool,
    submitting: bool,
) -> (&'static str, bool) {
    if closed {
        let label = if status == MatchStatus::FullTime {
            MATCH_ENDED
        } else {
            MATCH_STARTED
        };
        return (label, true);
    }
    let label = if has_bet {
        UPDATE_PREDICTION
    } else {
        PREDICT_SCORE
    };
    (label, submitting)
}

fn goal_input(name: &str, value: Option<u8>, team: &str, disabled: bool) -> Node {
    Node::number_input(
        name,
        value,
        format!("Your Prediction for {team}"),
        disabled,
        "goal-input",
    )
}
