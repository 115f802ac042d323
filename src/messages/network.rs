//! Network messages - communication between App and Network layers

use crate::models::{Feed, Game, GamesResponse, PaginationParams};
use crate::network::ApiError;

/// A single read against the catalog backend
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// One page of a feed
    Page {
        feed: Feed,
        params: PaginationParams,
    },
    /// One game by id
    Game(u64),
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    Fetch {
        id: u64,
        request: ApiRequest,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Page {
        id: u64,
        page: GamesResponse,
        time_ms: u64,
    },
    Game {
        id: u64,
        game: Box<Game>,
        time_ms: u64,
    },
    Failed {
        id: u64,
        error: ApiError,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Page { id, .. } => *id,
            NetworkResponse::Game { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
