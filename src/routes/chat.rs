use axum::{Json, extract::State};

use crate::{
    message::{ChatRequest, ChatResponse},
    services::chatbot::generate_reply,
    state::SharedState,
};

// Always 200: failures travel in `response`.
pub async fn autogen_chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    tracing::info!(message = %payload.message, language = %payload.language, "Request");

    let response = generate_reply(state.generator.as_ref(), &payload).await;

    Json(ChatResponse { response })
}
