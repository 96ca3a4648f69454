use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http_client::http_client;
use crate::status::MatchStatus;

const MATCHES_PATH: &str = "/matches";
const BETS_PATH: &str = "/bets";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub home_team_name: String,
    pub away_team_name: String,
    #[serde(default)]
    pub home_team_logo: String,
    #[serde(default)]
    pub away_team_logo: String,
    pub home_team_goals: Option<u8>,
    pub away_team_goals: Option<u8>,
    pub status: MatchStatus,
    pub timestamp: i64,
    pub can_users_place_bets: bool,
    // The first backend iteration had no visibility flag; treat its matches
    // as visible.
    #[serde(default = "show_default")]
    pub show: bool,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub bets: Vec<BetRecord>,
}

fn show_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetRecord {
    pub match_id: i64,
    pub predicted_home_goals: u8,
    pub predicted_away_goals: u8,
    #[serde(default)]
    pub use_wildcard: bool,
    #[serde(default)]
    pub user: Option<BetUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetUser {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct MatchesPayload {
    pub today: Vec<MatchRecord>,
    pub tomorrow: Vec<MatchRecord>,
}

#[derive(Debug, Clone, Default)]
pub struct BetsPayload {
    pub bets: Vec<BetRecord>,
    pub num_wildcards_remaining: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MatchesWire {
    Grouped {
        today: Vec<MatchRecord>,
        #[serde(default)]
        tomorrow: Vec<MatchRecord>,
    },
    Flat(Vec<MatchRecord>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BetsWire {
    Keyed {
        bets: Vec<BetRecord>,
        #[serde(default)]
        num_wildcards_remaining: u32,
    },
    Flat(Vec<BetRecord>),
}

pub fn parse_matches_json(raw: &str) -> Result<MatchesPayload> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(MatchesPayload::default());
    }
    let wire: MatchesWire = serde_json::from_str(trimmed).context("invalid matches json")?;
    Ok(match wire {
        MatchesWire::Grouped { today, tomorrow } => MatchesPayload { today, tomorrow },
        // Flat list from the first backend iteration: no day split yet, the
        // whole list belongs to the current day.
        MatchesWire::Flat(matches) => MatchesPayload {
            today: matches,
            tomorrow: Vec::new(),
        },
    })
}

pub fn parse_bets_json(raw: &str) -> Result<BetsPayload> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(BetsPayload::default());
    }
    let wire: BetsWire = serde_json::from_str(trimmed).context("invalid bets json")?;
    Ok(match wire {
        BetsWire::Keyed {
            bets,
            num_wildcards_remaining,
        } => BetsPayload {
            bets,
            num_wildcards_remaining,
        },
        // Flat list predates point boosters entirely.
        BetsWire::Flat(bets) => BetsPayload {
            bets,
            num_wildcards_remaining: 0,
        },
    })
}

/// Fetch the fixture list and the user's bets together. Both requests run in
/// parallel and nothing is returned until both have resolved.
pub fn fetch_page(base_url: &str) -> Result<(MatchesPayload, BetsPayload)> {
    let (matches, bets) = rayon::join(|| fetch_matches(base_url), || fetch_bets(base_url));
    Ok((matches?, bets?))
}

fn fetch_matches(base_url: &str) -> Result<MatchesPayload> {
    let body = get_body(&format!("{base_url}{MATCHES_PATH}"))?;
    parse_matches_json(&body)
}

fn fetch_bets(base_url: &str) -> Result<BetsPayload> {
    let body = get_body(&format!("{base_url}{BETS_PATH}"))?;
    parse_bets_json(&body)
}

fn get_body(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status}: {body}"));
    }
    Ok(body)
}

#[derive(Debug, Clone)]
pub struct BetSubmission {
    pub fixture_id: i64,
    pub home_goals: u8,
    pub away_goals: u8,
    pub use_wildcard: bool,
}

/// Submit one prediction as multipart form data. A rejected submission
/// resolves to the server's own explanation so it can be shown verbatim.
pub fn place_bet(base_url: &str, submission: &BetSubmission) -> Result<()> {
    let client = http_client()?;
    let form = reqwest::blocking::multipart::Form::new()
        .text("home_goals", submission.home_goals.to_string())
        .text("away_goals", submission.away_goals.to_string())
        .text("fixture_id", submission.fixture_id.to_string())
        .text("use_wildcard", if submission.use_wildcard { "1" } else { "0" });

    let resp = client
        .post(format!("{base_url}{BETS_PATH}"))
        .multipart(form)
        .send()
        .context("request failed")?;
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let body = resp.text().unwrap_or_default();
    Err(anyhow::anyhow!("{}", rejection_detail(status, &body)))
}

/// Pull the `detail` string out of an error body, falling back to the bare
/// status when the body carries no parseable explanation.
pub fn rejection_detail(status: reqwest::StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) => format!("http {status}"),
    }
}
