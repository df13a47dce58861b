use std::convert::Infallible;

use airdrop_merkle_tree::error::MerkleTreeError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_derive::{Deserialize, Serialize};
use serde_json::json;
use solana_program::pubkey::ParsePubkeyError;
use thiserror::Error;
use tracing::{error, warn};

use crate::distributor::DistributorError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Merkle Tree Validation Error: {0}")]
    MerkleTreeError(#[from] MerkleTreeError),

    #[error("Distributor Error: {0}")]
    DistributorError(#[from] DistributorError),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Proof not found for user {0}")]
    ProofNotFound(String),

    #[error("Parse Pubkey Error")]
    ParsePubkeyError(#[from] ParsePubkeyError),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Error {
    pub error: String,
}

fn distributor_status(e: &DistributorError) -> StatusCode {
    match e {
        DistributorError::InvalidMerkleRoot
        | DistributorError::MalformedInput(_)
        | DistributorError::MintMismatch(_)
        | DistributorError::OwnerMismatch(_) => StatusCode::BAD_REQUEST,
        DistributorError::AlreadyClaimed(_) | DistributorError::DistributorExists(_) => {
            StatusCode::CONFLICT
        }
        DistributorError::IndexOutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DistributorError::InsufficientVaultBalance { .. } => StatusCode::PAYMENT_REQUIRED,
        DistributorError::AccountNotFound(_) | DistributorError::DistributorNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DistributorError::ArithmeticError | DistributorError::LockPoisoned => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MerkleTreeError(e) => {
                error!("Merkle Tree Error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            ApiError::DistributorError(e) => {
                let status = distributor_status(&e);
                if status.is_server_error() {
                    error!("Distributor error: {e}");
                } else {
                    warn!("Rejected request: {e}");
                }
                (status, e.to_string())
            }
            ApiError::UserNotFound(s) => {
                warn!("User {s} not found");
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            ApiError::ProofNotFound(u) => {
                error!("Proof not found for user {u}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Proof not found".to_string())
            }
            ApiError::ParsePubkeyError(e) => {
                warn!("Parse pubkey error: {e}");
                (StatusCode::BAD_REQUEST, "Pubkey parse error".to_string())
            }
        };
        (
            status,
            Json(Error {
                error: error_message,
            }),
        )
            .into_response()
    }
}

pub async fn handle_error(error: BoxError) -> Result<impl IntoResponse, Infallible> {
    if error.is::<tower::timeout::error::Elapsed>() {
        return Ok((
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({
                "code" : 408,
                "error" : "Request Timeout",
            })),
        ));
    };
    if error.is::<tower::load_shed::error::Overloaded>() {
        return Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "code" : 503,
                "error" : "Service Unavailable",
            })),
        ));
    }

    Ok((
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "code" : 500,
            "error" : "Internal Server Error",
        })),
    ))
}
