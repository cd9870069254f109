//! Commands the UI issues against the service, and what comes back.
//!
//! [`execute`] is the only place that talks to a [`CarApi`].  It never
//! touches [`AppState`](super::state::AppState); results travel back as a
//! [`SyncUpdate`] and are applied on the UI loop.

use tracing::{debug, warn};

use crate::core::{
    api::{ApiError, CarApi},
    car::{Amount, NewCar, RentRequest, Reply, Snapshot},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the full collection for refresh cycle `generation`.
    Refresh { generation: u64 },
    AddCar(NewCar),
    DeleteCar(String),
    RentCar(RentRequest),
    ReturnCar(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Delete,
    Rent,
    Return,
}

impl MutationKind {
    /// Shown when the service gave no usable message.
    pub fn fallback(self) -> &'static str {
        match self {
            MutationKind::Add => "Add car failed",
            MutationKind::Delete => "Delete failed",
            MutationKind::Rent => "Rent failed",
            MutationKind::Return => "Return failed",
        }
    }

    pub fn success_message(self, reply: &Reply, currency: &str) -> String {
        match self {
            MutationKind::Add => "Car added & saved".to_string(),
            MutationKind::Delete => "Deleted successfully".to_string(),
            MutationKind::Rent => match reply.total {
                Some(total) => format!("Rented! Total = {currency}{}", Amount(total)),
                None => "Rented!".to_string(),
            },
            MutationKind::Return => "Car returned".to_string(),
        }
    }

    /// Server message when present, otherwise the per-action fallback.
    pub fn failure_message(self, err: &ApiError) -> String {
        err.server_message().unwrap_or(self.fallback()).to_string()
    }
}

#[derive(Debug)]
pub enum SyncUpdate {
    Fetched {
        generation: u64,
        result: Result<Snapshot, ApiError>,
    },
    Mutated {
        kind: MutationKind,
        result: Result<Reply, ApiError>,
    },
}

/// Run one command to completion.  No retries, no timeout.
pub async fn execute(api: &dyn CarApi, cmd: Command) -> SyncUpdate {
    let (kind, result) = match cmd {
        Command::Refresh { generation } => {
            let result = api.list_cars().await.map(Snapshot::new);
            if let Err(e) = &result {
                warn!(generation, "catalog fetch failed: {e}");
            }
            return SyncUpdate::Fetched { generation, result };
        }
        Command::AddCar(car) => (MutationKind::Add, api.add_car(&car).await),
        Command::DeleteCar(car_id) => (MutationKind::Delete, api.delete_car(&car_id).await),
        Command::RentCar(request) => (MutationKind::Rent, api.rent_car(&request).await),
        Command::ReturnCar(car_id) => (MutationKind::Return, api.return_car(&car_id).await),
    };
    match &result {
        Ok(_) => debug!(?kind, "mutation accepted"),
        Err(e) => warn!(?kind, "mutation rejected: {e}"),
    }
    SyncUpdate::Mutated { kind, result }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::fake::{car, Call, FakeCarApi};

    #[tokio::test]
    async fn refresh_wraps_catalog_in_snapshot() {
        let api = FakeCarApi::with_catalog(vec![car("C1", "Tata", "Nexon", true)]);
        match execute(&api, Command::Refresh { generation: 7 }).await {
            SyncUpdate::Fetched { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(api.calls(), [Call::List]);
    }

    #[tokio::test]
    async fn mutations_route_to_matching_endpoint() {
        let api = FakeCarApi::default();
        execute(&api, Command::DeleteCar("C1".into())).await;
        execute(&api, Command::ReturnCar("C2".into())).await;
        execute(
            &api,
            Command::RentCar(RentRequest {
                customer: "Asha".into(),
                car_id: "C3".into(),
                days: "2".into(),
            }),
        )
        .await;
        assert_eq!(
            api.calls(),
            [
                Call::Delete("C1".into()),
                Call::Return("C2".into()),
                Call::Rent("C3".into())
            ]
        );
    }

    #[test]
    fn failure_prefers_server_message() {
        let err = ApiError::Status {
            status: reqwest::StatusCode::BAD_REQUEST,
            reply: Reply {
                message: Some("Cannot delete: car is currently rented".into()),
                total: None,
            },
        };
        assert_eq!(
            MutationKind::Delete.failure_message(&err),
            "Cannot delete: car is currently rented"
        );

        let bare = ApiError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            reply: Reply::default(),
        };
        assert_eq!(MutationKind::Return.failure_message(&bare), "Return failed");

        let transport = ApiError::Transport("connection reset".into());
        assert_eq!(MutationKind::Add.failure_message(&transport), "Add car failed");
        assert_eq!(MutationKind::Rent.failure_message(&transport), "Rent failed");
    }

    #[test]
    fn rent_success_mentions_total() {
        let reply = Reply {
            message: Some("Rented successfully".into()),
            total: Some(3600.0),
        };
        assert_eq!(
            MutationKind::Rent.success_message(&reply, "₹"),
            "Rented! Total = ₹3600"
        );
        assert_eq!(MutationKind::Rent.success_message(&Reply::default(), "₹"), "Rented!");
    }
}
