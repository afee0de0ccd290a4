use axum::{
    body::Body,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::envelope::ResponseEnvelope;
use crate::error::AppError;
use crate::state::AppState;
use crate::translate::{TranslationRequest, TranslationResult};

/// `POST /translate`
///
/// Only JSON bodies are read, and only up to `max_body_bytes`. Anything else is
/// validated as an empty object.
pub async fn translate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let payload = if is_json_content_type(&headers) {
        let limit = state.config.system_config.max_body_bytes;
        match axum::body::to_bytes(body, limit).await {
            Ok(bytes) => parse_body(&bytes),
            Err(e) => {
                debug!("Failed to buffer request body: {}", e);
                return StatusCode::PAYLOAD_TOO_LARGE.into_response();
            }
        }
    } else {
        Map::new()
    };

    translate_payload(state, payload).await.into_response()
}

async fn translate_payload(
    state: AppState,
    payload: Map<String, Value>,
) -> Result<ResponseEnvelope, AppError> {
    let request = match validate(&payload) {
        Some(request) => request,
        None => {
            debug!("Rejecting translation request with missing fields");
            return Err(AppError::Validation);
        }
    };

    let span = info_span!(
        "translate",
        request_id = %Uuid::new_v4(),
        from = %request.from_lang,
        to = %request.to_lang,
        text_len = request.text.len(),
    );

    async move {
        match state.translator.translate(&request).await {
            Ok(translated_text) => {
                info!("Translation succeeded");
                Ok(ResponseEnvelope::Success(TranslationResult::new(
                    request,
                    translated_text,
                )))
            }
            Err(e) => {
                warn!("Translation failed: {}", e);
                Err(AppError::Invocation(e))
            }
        }
    }
    .instrument(span)
    .await
}

/// Decode the body as a JSON object. Malformed JSON and non-object values
/// become an empty object so that field validation reports them.
pub fn parse_body(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// All three fields must be present and truthy
pub fn validate(payload: &Map<String, Value>) -> Option<TranslationRequest> {
    Some(TranslationRequest {
        text: field_text(payload.get("text"))?,
        from_lang: field_text(payload.get("fromLang"))?,
        to_lang: field_text(payload.get("toLang"))?,
    })
}

/// Truthy scalars rendered as text. Empty strings, zero, `false`, `null`,
/// arrays and objects count as missing.
fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().map_or(true, |f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
