use crate::domain::backend::LoginCredentials;
use crate::domain::entities::{DateRange, Identity};
use crate::domain::errors::{BackendError, SessionError};
use crate::interface_adapters::protocol::{
    AppliedRange, BookingsQuery, BookingsResponse, ErrorResponse, IdentityResponse, LoginRequest,
    LoginResponse, LogoutResponse,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::credentials::validate_credentials;
use crate::use_cases::list_bookings::{BookingScope, ListBookingsUseCase};
use crate::use_cases::route_guard::{
    AccessRequirement, GuardOutcome, LOGIN_PATH, authorize, landing_path,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{error, info, warn};

type HttpError = (StatusCode, Json<ErrorResponse>);

const BAD_CREDENTIALS: &str = "Invalid username or password. Please try again.";
const ADMIN_REQUIRED: &str = "Administrator access required.";
const LOGIN_REQUIRED: &str = "Please log in to continue.";

#[tracing::instrument(name = "session_login", skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let credentials = LoginCredentials {
        email: payload.email,
        password: payload.password,
    };
    if let Err(errors) = validate_credentials(&credentials) {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(error_response(StatusCode::BAD_REQUEST, &message));
    }

    let grant = state
        .backend
        .login(&credentials)
        .await
        .map_err(|err| map_backend_error(err, BackendContext::Login))?;

    // Only the token is trusted; roles in the grant body are informational.
    let identity = state
        .session
        .write()
        .await
        .login(&grant.token)
        .map_err(map_session_error)?;

    let redirect = landing_path(&identity, payload.redirect.as_deref());
    info!(redirect = %redirect, "login accepted");

    Ok(Json(LoginResponse {
        identity: IdentityResponse::from(&identity),
        redirect,
    }))
}

#[tracing::instrument(name = "session_logout", skip_all)]
pub async fn logout(State(state): State<Arc<AppState>>) -> Json<LogoutResponse> {
    let logged_out = state.session.write().await.logout();
    Json(LogoutResponse { logged_out })
}

#[tracing::instrument(name = "current_session", skip_all)]
pub async fn current_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IdentityResponse>, HttpError> {
    let (identity, _token) = guarded_session(&state, AccessRequirement::Authenticated).await?;
    Ok(Json(IdentityResponse::from(&identity)))
}

// The logged-in guest's own bookings.
#[tracing::instrument(name = "guest_bookings", skip_all)]
pub async fn guest_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<BookingsResponse>, HttpError> {
    let (identity, token) = guarded_session(&state, AccessRequirement::Authenticated).await?;
    let range = parse_range(&query)?;

    list_bookings(&state, &token, BookingScope::Guest(identity.subject), range).await
}

// Every booking in the hotel, for administrators.
#[tracing::instrument(name = "admin_bookings", skip_all)]
pub async fn admin_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<BookingsResponse>, HttpError> {
    let (_identity, token) = guarded_session(&state, AccessRequirement::AdminOnly).await?;
    let range = parse_range(&query)?;

    list_bookings(&state, &token, BookingScope::All, range).await
}

async fn list_bookings(
    state: &AppState,
    token: &str,
    scope: BookingScope,
    range: Option<DateRange>,
) -> Result<Json<BookingsResponse>, HttpError> {
    let use_case = ListBookingsUseCase {
        backend: state.backend.clone(),
    };
    let bookings = use_case
        .execute(token, scope, range)
        .await
        .map_err(|err| map_backend_error(err, BackendContext::Listing))?;

    Ok(Json(BookingsResponse {
        total: bookings.len(),
        range: range.map(AppliedRange::from),
        bookings,
    }))
}

// Run the route guard and copy out what the view needs, releasing the lock
// before any backend call.
async fn guarded_session(
    state: &AppState,
    requirement: AccessRequirement,
) -> Result<(Identity, String), HttpError> {
    let session = state.session.read().await;
    let identity = session.current_identity();

    match authorize(identity, requirement) {
        GuardOutcome::Granted => {}
        GuardOutcome::RedirectToLogin => return Err(redirect_to_login()),
        GuardOutcome::AccessDenied => {
            return Err(error_response(StatusCode::FORBIDDEN, ADMIN_REQUIRED));
        }
    }

    match (identity, session.token()) {
        (Some(identity), Some(token)) => Ok((identity.clone(), token.to_string())),
        _ => Err(redirect_to_login()),
    }
}

fn parse_range(query: &BookingsQuery) -> Result<Option<DateRange>, HttpError> {
    DateRange::from_bounds(bound(&query.start_date), bound(&query.end_date))
        .map_err(|err| error_response(StatusCode::BAD_REQUEST, &err.to_string()))
}

// Blank form fields count as absent.
fn bound(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.trim().is_empty())
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> HttpError {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
            redirect: None,
        }),
    )
}

fn redirect_to_login() -> HttpError {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            message: LOGIN_REQUIRED.to_string(),
            redirect: Some(LOGIN_PATH.to_string()),
        }),
    )
}

fn map_session_error(err: SessionError) -> HttpError {
    match err {
        SessionError::Decode(err) => {
            warn!(error = %err, "backend issued an unusable token");
            error_response(StatusCode::UNAUTHORIZED, BAD_CREDENTIALS)
        }
        SessionError::StorageFailure => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Could not save the session.",
        ),
    }
}

// Maps backend errors to HTTP responses by endpoint context.
enum BackendContext {
    Login,
    Listing,
}

fn map_backend_error(err: BackendError, context: BackendContext) -> HttpError {
    match (context, &err) {
        (BackendContext::Login, _) if err.is_client_rejection() => {
            info!(error = %err, "credentials rejected");
            error_response(StatusCode::UNAUTHORIZED, BAD_CREDENTIALS)
        }
        (BackendContext::Listing, BackendError::Upstream { status: 401, .. }) => {
            warn!(error = %err, "backend rejected the session token");
            redirect_to_login()
        }
        (BackendContext::Listing, BackendError::Upstream { status: 403, .. }) => {
            error_response(StatusCode::FORBIDDEN, ADMIN_REQUIRED)
        }
        _ => {
            error!(error = %err, "hotel backend request failed");
            error_response(StatusCode::BAD_GATEWAY, "Hotel service unavailable.")
        }
    }
}
