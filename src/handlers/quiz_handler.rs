use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{GenerateQuizRequest, HistoryParams},
};

#[post("/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let payload = state
        .quiz_service
        .create_quiz(&request.topic, request.num_questions, request.use_wikipedia)
        .await?;
    Ok(HttpResponse::Ok().json(payload))
}

#[get("/history")]
async fn get_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let history = state.quiz_service.list_history(params.limit()).await?;
    Ok(HttpResponse::Ok().json(history))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
