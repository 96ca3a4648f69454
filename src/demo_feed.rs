use chrono::Utc;

use crate::backend::{BetRecord, BetUser, BetsPayload, MatchRecord, MatchesPayload};
use crate::status::MatchStatus;

/// Canned page used when no backend is configured, so the interface can be
/// driven without a server.
pub fn demo_matches() -> MatchesPayload {
    let now = Utc::now().timestamp();
    MatchesPayload {
        today: vec![
            match_record(
                101,
                "Arsenal",
                "Chelsea",
                MatchStatus::NotStarted,
                None,
                None,
                now + 3 * 3600,
                true,
            ),
            match_record(
                102,
                "Liverpool",
                "Manchester City",
                MatchStatus::FirstHalf,
                Some(1),
                Some(0),
                now - 1800,
                false,
            ),
            with_bets(
                match_record(
                    103,
                    "Newcastle",
                    "Everton",
                    MatchStatus::FullTime,
                    Some(2),
                    Some(2),
                    now - 4 * 3600,
                    false,
                ),
                vec![
                    bet(103, 2, 1, false, Some("ines")),
                    bet(103, 0, 0, true, Some("marco")),
                    bet(103, 2, 2, false, Some("petra")),
                ],
            ),
        ],
        tomorrow: vec![match_record(
            201,
            "Aston Villa",
            "Tottenham",
            MatchStatus::NotStarted,
            None,
            None,
            now + 27 * 3600,
            true,
        )],
    }
}

pub fn demo_bets() -> BetsPayload {
    BetsPayload {
        bets: vec![bet(103, 2, 1, false, None)],
        num_wildcards_remaining: 2,
    }
}

#[allow(clippy::too_many_arguments)]
fn match_record(
    id: i64,
    home: &str,
    away: &str,
    status: MatchStatus,
    home_goals: Option<u8>,
    away_goals: Option<u8>,
    timestamp: i64,
    can_bet: bool,
) -> MatchRecord {
    MatchRecord {
        id,
        home_team_name: home.to_string(),
        away_team_name: away.to_string(),
        home_team_logo: format!("https://example.com/logos/{id}-home.png"),
        away_team_logo: format!("https://example.com/logos/{id}-away.png"),
        home_team_goals: home_goals,
        away_team_goals: away_goals,
        status,
        timestamp,
        can_users_place_bets: can_bet,
        show: true,
        league_name: Some("Premier League".to_string()),
        bets: Vec::new(),
    }
}

fn with_bets(mut record: MatchRecord, bets: Vec<BetRecord>) -> MatchRecord {
    record.bets = bets;
    record
}

fn bet(match_id: i64, home: u8, away: u8, wildcard: bool, user: Option<&str>) -> BetRecord {
    BetRecord {
        match_id,
        predicted_home_goals: home,
        predicted_away_goals: away,
        use_wildcard: wildcard,
        user: user.map(|name| BetUser {
            name: name.to_string(),
        }),
    }
}
