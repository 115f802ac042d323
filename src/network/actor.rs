//! Network actor - runs catalog requests in the Tokio async runtime

use std::time::Instant;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{ApiRequest, NetworkCommand, NetworkResponse};
use crate::models::Feed;
use crate::network::client::GameService;

/// Network actor that turns fetch commands into API calls
pub struct NetworkActor {
    service: GameService,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(service: GameService, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            service,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Fetch { id, request }) => {
                            let response_tx = self.response_tx.clone();
                            let service = self.service.clone();

                            // Requests are never aborted; stale results are dropped by the app layer
                            self.active_requests.spawn(async move {
                                tracing::info!(id, request = ?request, "Executing request");
                                let result = execute(&service, request, id).await;
                                tracing::info!(id, "Request completed");
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}

/// Perform one request and wrap the outcome for the app layer
pub async fn execute(service: &GameService, request: ApiRequest, id: u64) -> NetworkResponse {
    let start = Instant::now();

    let result = match request {
        ApiRequest::Page { feed, params } => {
            let page = match &feed {
                Feed::All => service.get_games(params).await,
                Feed::Free => service.get_free_games(params).await,
                Feed::OnSale => service.get_on_sale_games(params).await,
                Feed::Search(query) => service.search_games(query, params).await,
                Feed::Category(category) => service.get_games_by_category(category, params).await,
            };
            page.map(|page| NetworkResponse::Page {
                id,
                page,
                time_ms: start.elapsed().as_millis() as u64,
            })
        }
        ApiRequest::Game(game_id) => service.get_game(game_id).await.map(|game| NetworkResponse::Game {
            id,
            game: Box::new(game),
            time_ms: start.elapsed().as_millis() as u64,
        }),
    };

    result.unwrap_or_else(|error| NetworkResponse::Failed {
        id,
        error,
        time_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaginationParams;
    use wiremock::matchers::path;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_actor_round_trip() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games/free"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"games":[],"total":3,"limit":20,"offset":0}"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(path("/api/games/9"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = GameService::new(format!("{}/api", server.uri()));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(NetworkActor::new(service, resp_tx).run(cmd_rx));

        cmd_tx
            .send(NetworkCommand::Fetch {
                id: 1,
                request: ApiRequest::Page {
                    feed: Feed::Free,
                    params: PaginationParams::new(20, 0),
                },
            })
            .unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::Page { id, page, .. } => {
                assert_eq!(id, 1);
                assert_eq!(page.total, 3);
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cmd_tx
            .send(NetworkCommand::Fetch { id: 2, request: ApiRequest::Game(9) })
            .unwrap();
        match resp_rx.recv().await.unwrap() {
            NetworkResponse::Failed { id, error, .. } => {
                assert_eq!(id, 2);
                assert_eq!(error.status(), 500);
                assert_eq!(error.code(), "Internal Server Error");
            }
            other => panic!("unexpected response: {:?}", other),
        }

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
        handle.await.unwrap();
    }
}
