use crate::proxy::search_with_timeout;
use crate::provider::ProviderError;
use crate::search::{resolve_query, ErrorEnvelope};
use crate::server::ServerState;
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

fn error_status(error: &ProviderError) -> Status {
    match error {
        ProviderError::Timeout(_) => Status::GatewayTimeout,
        ProviderError::NotFound(_) => Status::NotFound,
        ProviderError::Unauthorized(_) => Status::Unauthorized,
        ProviderError::Unknown(_) => Status::InternalServerError,
    }
}

fn error_envelope(error: &ProviderError) -> ErrorEnvelope {
    match error.message() {
        "" => ErrorEnvelope::new(UNKNOWN_ERROR_MESSAGE),
        message => ErrorEnvelope::new(message),
    }
}

#[get("/api/perplexity?<query>")]
pub async fn handle_perplexity(
    state: &State<ServerState>,
    query: Option<String>,
) -> Result<Json<Value>, (Status, Json<ErrorEnvelope>)> {
    let query = resolve_query(query.as_deref());
    match search_with_timeout(state.provider.as_ref(), &query, state.timeout).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let status = error_status(&e);
            log::error!("Error in perplexity search for {:?}: {} ({})", query, e, status);
            Err((status, Json(error_envelope(&e))))
        }
    }
}
