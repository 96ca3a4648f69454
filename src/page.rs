use crate::backend::{BetRecord, BetsPayload, MatchesPayload};
use crate::fixture_card::fixture_card;
use crate::state::{FixtureEntry, FormState};
use crate::status::DayBucket;
use crate::view::{Container, MountOp, Node};

pub const NO_MATCHES_PLACEHOLDER: &str = "No matches available at the moment";

/// The user's own bet on a match, if any. The bet list holds at most one
/// entry per match for the current user.
pub fn my_bet<'a>(bets: &'a [BetRecord], match_id: i64) -> Option<&'a BetRecord> {
    bets.iter().find(|bet| bet.match_id == match_id)
}

/// Split fetched matches into the two day buckets, dropping hidden matches
/// and pairing each survivor with its form state.
pub fn partition(
    matches: MatchesPayload,
    bets: &BetsPayload,
) -> (Vec<FixtureEntry>, Vec<FixtureEntry>) {
    let build = |records: Vec<crate::backend::MatchRecord>| -> Vec<FixtureEntry> {
        records
            .into_iter()
            .filter(|record| record.show)
            .map(|record| {
                let bet = my_bet(&bets.bets, record.id).cloned();
                let form = FormState::from_bet(bet.as_ref(), bets.num_wildcards_remaining);
                FixtureEntry {
                    record,
                    my_bet: bet,
                    form,
                    predictions_expanded: false,
                }
            })
            .collect()
    };
    (build(matches.today), build(matches.tomorrow))
}

/// Render both day buckets into mount operations, in page order.
pub fn render_ops(
    today: &[FixtureEntry],
    tomorrow: &[FixtureEntry],
    wildcards_remaining: u32,
) -> Vec<MountOp> {
    let mut ops = Vec::new();
    render_bucket(
        &mut ops,
        Container::TodaysFixtures,
        DayBucket::Today,
        today,
        wildcards_remaining,
    );
    render_bucket(
        &mut ops,
        Container::TomorrowsFixtures,
        DayBucket::Tomorrow,
        tomorrow,
        wildcards_remaining,
    );
    ops
}

fn render_bucket(
    ops: &mut Vec<MountOp>,
    container: Container,
    day: DayBucket,
    entries: &[FixtureEntry],
    wildcards_remaining: u32,
) {
    if entries.is_empty() {
        ops.push(MountOp::Append {
            container,
            node: Node::text(NO_MATCHES_PLACEHOLDER, "no-matches"),
        });
        return;
    }
    for entry in entries {
        ops.push(MountOp::Append {
            container,
            node: fixture_card(entry, day, wildcards_remaining),
        });
    }
}

/// One full page load: partition, render every card, then clear the loading
/// indicator. The returned list is the complete set of side effects.
pub fn build_page(matches: MatchesPayload, bets: BetsPayload) -> Vec<MountOp> {
    let wildcards_remaining = bets.num_wildcards_remaining;
    let (today, tomorrow) = partition(matches, &bets);
    let mut ops = render_ops(&today, &tomorrow, wildcards_remaining);
    ops.push(MountOp::Clear {
        container: Container::LoadingIndicator,
    });
    ops
}
