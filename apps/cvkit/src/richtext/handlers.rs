use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::richtext::{decode, encode, EditorSession, RichTextDocument, Selection};

#[derive(Deserialize)]
pub struct DecodeRequest {
    #[serde(default)]
    pub serialized: Option<String>,
}

#[derive(Serialize)]
pub struct DecodeResponse {
    pub document: RichTextDocument,
    pub plain_text: String,
}

/// POST /api/v1/richtext/decode
pub async fn handle_decode(Json(req): Json<DecodeRequest>) -> Json<DecodeResponse> {
    let document = decode(req.serialized.as_deref());
    let plain_text = document.to_plain_text();
    Json(DecodeResponse {
        document,
        plain_text,
    })
}

#[derive(Deserialize)]
pub struct EncodeRequest {
    pub document: RichTextDocument,
}

#[derive(Serialize)]
pub struct EncodeResponse {
    pub serialized: String,
}

/// POST /api/v1/richtext/encode
pub async fn handle_encode(Json(req): Json<EncodeRequest>) -> Json<EncodeResponse> {
    Json(EncodeResponse {
        serialized: encode(&req.document.normalized()),
    })
}

#[derive(Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub serialized: Option<String>,
    pub selection: Selection,
    pub command: String,
}

#[derive(Serialize)]
pub struct CommandResponse {
    pub serialized: String,
    pub document: RichTextDocument,
    pub handled: bool,
}

/// POST /api/v1/richtext/command
pub async fn handle_command(
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError> {
    let mut session = EditorSession::open(req.serialized.as_deref());
    req.selection
        .validate(session.document())
        .map_err(AppError::Validation)?;
    session.set_selection(req.selection);
    let handled = session.apply_command(&req.command);

    Ok(Json(CommandResponse {
        serialized: session.encode(),
        document: session.document().clone(),
        handled,
    }))
}
