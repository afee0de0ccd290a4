use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::translate::TranslationResult;

pub const STATUS_SUCCESS: u8 = 1;
pub const STATUS_FAILURE: u8 = 0;

/// The only shape callers ever see:
/// `{"status":1,"data":{..}}` or `{"status":0,"message":".."}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseEnvelope {
    Success(TranslationResult),
    Failure(String),
}

impl ResponseEnvelope {
    pub fn status(&self) -> u8 {
        match self {
            ResponseEnvelope::Success(_) => STATUS_SUCCESS,
            ResponseEnvelope::Failure(_) => STATUS_FAILURE,
        }
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ResponseEnvelope", 2)?;
        state.serialize_field("status", &self.status())?;
        match self {
            ResponseEnvelope::Success(data) => state.serialize_field("data", data)?,
            ResponseEnvelope::Failure(message) => state.serialize_field("message", message)?,
        }
        state.end()
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = match self {
            ResponseEnvelope::Success(_) => StatusCode::OK,
            ResponseEnvelope::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}
