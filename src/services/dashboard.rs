use crate::domain::call::CallWithRelations;
use crate::domain::candidate::Candidate;
use crate::domain::client::Client;
use crate::domain::event::Event;
use crate::repository::{CallReader, CandidateReader, ClientReader, EventReader};
use crate::services::{calls, candidates, clients, events};

/// The four record sets the dashboard view replaces in one load.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub candidates: Vec<Candidate>,
    pub clients: Vec<Client>,
    pub events: Vec<Event>,
    pub calls: Vec<CallWithRelations>,
}

/// Fetches all four entity kinds concurrently. Each fetch fails soft, so
/// the join always completes; a failed leg contributes an empty list
/// rather than aborting the others.
pub async fn load_dashboard<R>(repo: &R) -> DashboardSnapshot
where
    R: CandidateReader + ClientReader + EventReader + CallReader + Sync + ?Sized,
{
    let (candidates, clients, events, calls) = tokio::join!(
        candidates::load_candidates(repo),
        clients::load_clients(repo),
        events::load_events(repo),
        calls::load_calls(repo),
    );

    DashboardSnapshot {
        candidates,
        clients,
        events,
        calls,
    }
}
