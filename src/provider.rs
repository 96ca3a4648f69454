use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::backend;
use crate::demo_feed;
use crate::state::{Delta, ProviderCommand};

/// Background worker for all backend traffic. Page fetches run on this
/// thread; each bet submission gets its own thread so forms stay independent
/// of each other.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>, base_url: Option<String>) {
    thread::spawn(move || {
        for cmd in cmd_rx {
            match cmd {
                ProviderCommand::FetchPage => fetch_page(&tx, base_url.as_deref()),
                ProviderCommand::PlaceBet(submission) => {
                    let tx = tx.clone();
                    let base_url = base_url.clone();
                    thread::spawn(move || {
                        let match_id = submission.fixture_id;
                        let result = match &base_url {
                            Some(base) => backend::place_bet(base, &submission),
                            None => Ok(()),
                        };
                        match result {
                            Ok(()) => {
                                let _ = tx.send(Delta::BetAccepted { match_id });
                            }
                            Err(err) => {
                                let _ = tx.send(Delta::BetRejected {
                                    match_id,
                                    detail: err.to_string(),
                                });
                            }
                        }
                    });
                }
            }
        }
    });
}

fn fetch_page(tx: &Sender<Delta>, base_url: Option<&str>) {
    let Some(base) = base_url else {
        let _ = tx.send(Delta::Log(
            "[INFO] No API_BASE_URL set; serving demo fixtures".to_string(),
        ));
        let _ = tx.send(Delta::PageLoaded {
            matches: demo_feed::demo_matches(),
            bets: demo_feed::demo_bets(),
        });
        return;
    };
    match backend::fetch_page(base) {
        Ok((matches, bets)) => {
            let _ = tx.send(Delta::PageLoaded { matches, bets });
        }
        // No retry: the loading indicator stays until a manual reload.
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Page fetch error: {err}")));
        }
    }
}
