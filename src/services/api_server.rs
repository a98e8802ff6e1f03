// src/services/api_server.rs
//! API Server for the credential registry
//!
//! REST interface over the registry, used by issuing and verifying parties
//! and by external audit indexers. The caller identity of each request is
//! taken from the `x-caller-address` header.
//!
//! The API is built using Axum and includes endpoints for:
//! - Credential issuance (from a commitment or from a full document)
//! - Revocation
//! - Verification and read-only queries
//! - Transfer entry points, which always fail
//! - Audit log retrieval and export

use crate::contracts::transfer_guard::{self, TransferAttempt};
use crate::error::RegistryError;
use crate::models::credential::{Commitment, CredentialId, CredentialInfo};
use crate::models::degree::DegreeRecord;
use crate::models::event::EventRecord;
use crate::services::credential_issuer::{CredentialIssuer, DocumentError};
use crate::services::verifier::Verifier;
use crate::services::SharedRegistry;
use crate::utils::serialization::events_to_ndjson;
use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Json, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use ethers_core::types::Address;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Header carrying the caller's address.
pub const CALLER_HEADER: &str = "x-caller-address";

// API request and response structures

/// Request payload for issuing a credential from a precomputed commitment
#[derive(Serialize, Deserialize)]
pub struct IssueCredentialRequest {
    pub holder: Address,
    pub commitment: Commitment,
}

/// Response for credential issuance operation
#[derive(Serialize, Deserialize)]
pub struct IssueCredentialResponse {
    pub credential_id: CredentialId,
}

/// Request payload for issuing a credential from an off-ledger document
#[derive(Serialize, Deserialize)]
pub struct IssueDocumentRequest {
    pub holder: Address,
    pub document: DegreeRecord,
}

/// Response for document issuance, including the derived commitment
#[derive(Serialize, Deserialize)]
pub struct IssueDocumentResponse {
    pub credential_id: CredentialId,
    pub commitment: Commitment,
}

/// Request payload for revoking a credential
#[derive(Serialize, Deserialize)]
pub struct RevokeCredentialRequest {
    pub credential_id: CredentialId,
}

/// Response for credential revocation operation
#[derive(Serialize, Deserialize)]
pub struct RevokeCredentialResponse {
    pub credential_id: CredentialId,
    pub revoked: bool,
}

/// Request payload for verifying a commitment
#[derive(Serialize, Deserialize)]
pub struct VerifyCredentialRequest {
    pub credential_id: CredentialId,
    pub commitment: Commitment,
}

/// Request payload for verifying a disclosed document
#[derive(Serialize, Deserialize)]
pub struct VerifyDocumentRequest {
    pub credential_id: CredentialId,
    pub document: DegreeRecord,
}

/// Response for verification operations
#[derive(Serialize, Deserialize)]
pub struct VerifyCredentialResponse {
    pub is_valid: bool,
}

#[derive(Serialize, Deserialize)]
pub struct CommitmentResponse {
    pub commitment: Commitment,
}

#[derive(Serialize, Deserialize)]
pub struct OwnerResponse {
    pub holder: Address,
}

#[derive(Serialize, Deserialize)]
pub struct BalanceResponse {
    pub holder: Address,
    pub balance: usize,
}

/// Collection metadata
#[derive(Serialize, Deserialize)]
pub struct MetadataResponse {
    pub name: String,
    pub symbol: String,
    pub authority: Address,
    pub total_issued: CredentialId,
}

#[derive(Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub credential_id: CredentialId,
}

#[derive(Serialize, Deserialize)]
pub struct ApproveTransferRequest {
    pub spender: Address,
    pub credential_id: CredentialId,
}

#[derive(Serialize, Deserialize)]
pub struct ApprovalForAllRequest {
    pub operator: Address,
    pub allowed: bool,
}

/// Response containing the registry audit log
#[derive(Serialize, Deserialize)]
pub struct AuditLogResponse {
    pub events: Vec<EventRecord>,
}

/// Error body returned for every failed request
#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Request-level failures.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("missing x-caller-address header")]
    MissingCaller,

    #[error("malformed caller address: {0}")]
    InvalidCaller(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// JSON body extractor whose rejections render as [`ErrorBody`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path extractor whose rejections render as [`ErrorBody`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Serialization(e) => ApiError::Serialization(e),
            DocumentError::Registry(e) => ApiError::Registry(e),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Registry(RegistryError::Unauthorized { .. }) => StatusCode::FORBIDDEN,
            ApiError::Registry(RegistryError::NonTransferable) => StatusCode::FORBIDDEN,
            ApiError::Registry(RegistryError::InvalidCommitment) => StatusCode::BAD_REQUEST,
            ApiError::Registry(RegistryError::InvalidHolder) => StatusCode::BAD_REQUEST,
            ApiError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Registry(RegistryError::AlreadyRevoked(_)) => StatusCode::CONFLICT,
            ApiError::MissingCaller | ApiError::InvalidCaller(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Registry(e) => e.kind(),
            ApiError::MissingCaller => "missing_caller",
            ApiError::InvalidCaller(_) => "invalid_caller",
            ApiError::Serialization(_) => "serialization",
            ApiError::BadRequest(_) => "bad_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Extracts the caller address from the request headers.
fn caller_from(headers: &HeaderMap) -> Result<Address, ApiError> {
    let raw = headers
        .get(CALLER_HEADER)
        .ok_or(ApiError::MissingCaller)?
        .to_str()
        .map_err(|e| ApiError::InvalidCaller(e.to_string()))?;
    raw.trim()
        .parse::<Address>()
        .map_err(|e| ApiError::InvalidCaller(format!("{}: {}", raw, e)))
}

/// API server state containing all service dependencies
#[derive(Clone)]
pub struct ApiServer {
    /// Shared registry handle
    registry: SharedRegistry,

    /// Service for verifying credentials
    verifier: Verifier,
}

impl ApiServer {
    /// Creates a new instance of the API server
    ///
    /// # Arguments
    /// * `registry` - Shared registry handle all requests operate on
    pub fn new(registry: SharedRegistry) -> Self {
        ApiServer {
            verifier: Verifier::new(registry.clone()),
            registry,
        }
    }

    /// Builds the router with all API routes
    pub fn router(self) -> Router {
        Router::new()
            .route("/metadata", get(Self::metadata_handler))
            .route("/issue-credential", post(Self::issue_credential_handler))
            .route("/issue-document", post(Self::issue_document_handler))
            .route("/revoke-credential", post(Self::revoke_credential_handler))
            .route("/verify-credential", post(Self::verify_credential_handler))
            .route("/verify-document", post(Self::verify_document_handler))
            .route("/credential-info/:id", get(Self::credential_info_handler))
            .route("/commitment/:id", get(Self::commitment_handler))
            .route("/owner-of/:id", get(Self::owner_of_handler))
            .route("/balance-of/:holder", get(Self::balance_of_handler))
            .route("/transfer", post(Self::transfer_handler))
            .route("/safe-transfer", post(Self::safe_transfer_handler))
            .route("/approve-transfer", post(Self::approve_transfer_handler))
            .route("/set-approval-for-all", post(Self::set_approval_for_all_handler))
            .route("/audit-log", get(Self::audit_log_handler))
            .route("/audit-log/export", get(Self::audit_log_export_handler))
            .with_state(self)
    }

    /// Starts the API server and begins listening for requests
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    pub async fn run(self, addr: SocketAddr) -> std::io::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("API server listening on http://{}", addr);
        axum::serve(listener, app).await
    }

    // =====================
    // Metadata
    // =====================

    /// GET /metadata
    async fn metadata_handler(State(state): State<ApiServer>) -> Json<MetadataResponse> {
        let registry = state.registry.lock().await;
        Json(MetadataResponse {
            name: registry.name().to_string(),
            symbol: registry.symbol().to_string(),
            authority: registry.owner(),
            total_issued: registry.total_issued(),
        })
    }

    // =====================
    // Issuance and revocation
    // =====================

    /// Issues a credential from a precomputed commitment
    ///
    /// # Endpoint
    /// POST /issue-credential
    ///
    /// # Responses
    /// - 200 OK: Returns the new credential id
    /// - 400 Bad Request: Zero commitment, zero holder or missing caller
    /// - 403 Forbidden: Caller is not the authority
    async fn issue_credential_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        ApiJson(payload): ApiJson<IssueCredentialRequest>,
    ) -> ApiResult<IssueCredentialResponse> {
        let caller = caller_from(&headers)?;
        let credential_id = CredentialIssuer::new(state.registry.clone(), caller)
            .issue_commitment(payload.holder, payload.commitment)
            .await?;
        Ok(Json(IssueCredentialResponse { credential_id }))
    }

    /// Derives the commitment of a degree document and issues it
    ///
    /// # Endpoint
    /// POST /issue-document
    ///
    /// The document is hashed server-side and discarded; only the commitment
    /// is recorded.
    async fn issue_document_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        ApiJson(payload): ApiJson<IssueDocumentRequest>,
    ) -> ApiResult<IssueDocumentResponse> {
        let caller = caller_from(&headers)?;
        let (credential_id, commitment) = CredentialIssuer::new(state.registry.clone(), caller)
            .issue_document(payload.holder, &payload.document)
            .await?;
        Ok(Json(IssueDocumentResponse { credential_id, commitment }))
    }

    /// Revokes a credential
    ///
    /// # Endpoint
    /// POST /revoke-credential
    ///
    /// # Responses
    /// - 200 OK: Credential revoked
    /// - 403 Forbidden: Caller is not the authority
    /// - 404 Not Found: Credential was never issued
    /// - 409 Conflict: Credential already revoked
    async fn revoke_credential_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        ApiJson(payload): ApiJson<RevokeCredentialRequest>,
    ) -> ApiResult<RevokeCredentialResponse> {
        let caller = caller_from(&headers)?;
        CredentialIssuer::new(state.registry.clone(), caller)
            .revoke(payload.credential_id)
            .await?;
        Ok(Json(RevokeCredentialResponse {
            credential_id: payload.credential_id,
            revoked: true,
        }))
    }

    // =====================
    // Verification and queries
    // =====================

    /// POST /verify-credential
    ///
    /// 404 when the credential was never issued; `is_valid: false` when it
    /// exists but the commitment differs or it was revoked.
    async fn verify_credential_handler(
        State(state): State<ApiServer>,
        ApiJson(payload): ApiJson<VerifyCredentialRequest>,
    ) -> ApiResult<VerifyCredentialResponse> {
        let is_valid = state
            .verifier
            .verify_commitment(payload.credential_id, &payload.commitment)
            .await?;
        Ok(Json(VerifyCredentialResponse { is_valid }))
    }

    /// POST /verify-document
    async fn verify_document_handler(
        State(state): State<ApiServer>,
        ApiJson(payload): ApiJson<VerifyDocumentRequest>,
    ) -> ApiResult<VerifyCredentialResponse> {
        let is_valid = state
            .verifier
            .verify_document(payload.credential_id, &payload.document)
            .await?;
        Ok(Json(VerifyCredentialResponse { is_valid }))
    }

    /// GET /credential-info/:id
    async fn credential_info_handler(
        State(state): State<ApiServer>,
        ApiPath(id): ApiPath<CredentialId>,
    ) -> ApiResult<CredentialInfo> {
        let registry = state.registry.lock().await;
        Ok(Json(registry.get_info(id)?))
    }

    /// GET /commitment/:id
    async fn commitment_handler(
        State(state): State<ApiServer>,
        ApiPath(id): ApiPath<CredentialId>,
    ) -> ApiResult<CommitmentResponse> {
        let registry = state.registry.lock().await;
        let commitment = registry.get_commitment(id)?;
        Ok(Json(CommitmentResponse { commitment }))
    }

    /// GET /owner-of/:id
    async fn owner_of_handler(
        State(state): State<ApiServer>,
        ApiPath(id): ApiPath<CredentialId>,
    ) -> ApiResult<OwnerResponse> {
        let registry = state.registry.lock().await;
        let holder = registry.owner_of(id)?;
        Ok(Json(OwnerResponse { holder }))
    }

    /// GET /balance-of/:holder
    async fn balance_of_handler(
        State(state): State<ApiServer>,
        ApiPath(holder): ApiPath<Address>,
    ) -> ApiResult<BalanceResponse> {
        let registry = state.registry.lock().await;
        let balance = registry.balance_of(holder)?;
        Ok(Json(BalanceResponse { holder, balance }))
    }

    // =====================
    // Transfer entry points
    // =====================
    // Neither the caller header nor the body has to be well formed: every
    // request ends in `NonTransferable`.

    /// POST /transfer
    async fn transfer_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<StatusCode, ApiError> {
        let caller = caller_from(&headers).unwrap_or_default();
        let mut registry = state.registry.lock().await;
        match serde_json::from_slice::<TransferRequest>(&body) {
            Ok(req) => registry.transfer(caller, req.from, req.to, req.credential_id)?,
            Err(_) => transfer_guard::deny(caller, TransferAttempt::Malformed)?,
        }
        Ok(StatusCode::OK)
    }

    /// POST /safe-transfer
    async fn safe_transfer_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<StatusCode, ApiError> {
        let caller = caller_from(&headers).unwrap_or_default();
        let mut registry = state.registry.lock().await;
        match serde_json::from_slice::<TransferRequest>(&body) {
            Ok(req) => registry.safe_transfer(caller, req.from, req.to, req.credential_id)?,
            Err(_) => transfer_guard::deny(caller, TransferAttempt::Malformed)?,
        }
        Ok(StatusCode::OK)
    }

    /// POST /approve-transfer
    async fn approve_transfer_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<StatusCode, ApiError> {
        let caller = caller_from(&headers).unwrap_or_default();
        let mut registry = state.registry.lock().await;
        match serde_json::from_slice::<ApproveTransferRequest>(&body) {
            Ok(req) => registry.approve_transfer(caller, req.spender, req.credential_id)?,
            Err(_) => transfer_guard::deny(caller, TransferAttempt::Malformed)?,
        }
        Ok(StatusCode::OK)
    }

    /// POST /set-approval-for-all
    async fn set_approval_for_all_handler(
        State(state): State<ApiServer>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<StatusCode, ApiError> {
        let caller = caller_from(&headers).unwrap_or_default();
        let mut registry = state.registry.lock().await;
        match serde_json::from_slice::<ApprovalForAllRequest>(&body) {
            Ok(req) => registry.set_transfer_approval_for_all(caller, req.operator, req.allowed)?,
            Err(_) => transfer_guard::deny(caller, TransferAttempt::Malformed)?,
        }
        Ok(StatusCode::OK)
    }

    // =====================
    // Audit log
    // =====================

    /// GET /audit-log
    async fn audit_log_handler(State(state): State<ApiServer>) -> Json<AuditLogResponse> {
        let registry = state.registry.lock().await;
        Json(AuditLogResponse {
            events: registry.events().to_vec(),
        })
    }

    /// GET /audit-log/export
    ///
    /// Newline-delimited JSON, one event per line, for external indexers.
    async fn audit_log_export_handler(State(state): State<ApiServer>) -> Result<Response, ApiError> {
        let registry = state.registry.lock().await;
        let body = events_to_ndjson(registry.events())?;
        Ok(([(header::CONTENT_TYPE, "application/x-ndjson")], body).into_response())
    }
}
