use actix_web::{http::StatusCode, web, HttpResponse, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::ranking::RankingQuery;
use crate::ranking::RankingError;
use crate::services::RankingService;

/// Map an engine error onto the JSON error body and status the clients expect.
pub fn ranking_error_response(error: &RankingError) -> HttpResponse {
    let status = match error {
        RankingError::InvalidScope(_)
        | RankingError::MissingYear
        | RankingError::InvalidYear(_)
        | RankingError::MatchNotFinalized(_) => StatusCode::BAD_REQUEST,
        RankingError::NotMember(_) => StatusCode::FORBIDDEN,
        RankingError::PeladaNotFound(_)
        | RankingError::PlayerNotFound(_)
        | RankingError::MatchNotFound(_) => StatusCode::NOT_FOUND,
        RankingError::InvalidData(_) | RankingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if error.is_client_error() {
        tracing::warn!("Rejected ranking request: {}", error);
        HttpResponse::build(status).json(ApiResponse::<()>::error(error.to_string()))
    } else {
        tracing::error!("Ranking computation failed: {}", error);
        HttpResponse::build(status).json(ApiResponse::<()>::error("Internal server error"))
    }
}

fn requester_id(claims: &Claims) -> Option<Uuid> {
    let id = claims.player_id();
    if id.is_none() {
        tracing::error!("Invalid player ID in claims: {}", claims.sub);
    }
    id
}

fn invalid_claims() -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid user ID"))
}

/// Global leaderboard: top slice plus the requester's own row when off it
#[tracing::instrument(
    name = "Get global ranking",
    skip(service, claims),
    fields(player = %claims.name)
)]
pub async fn get_global_ranking(
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(requester) = requester_id(&claims) else {
        return Ok(invalid_claims());
    };

    match service.global_ranking(Some(requester), Utc::now().date_naive()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(ranking_error_response(&e)),
    }
}

#[tracing::instrument(
    name = "Get pelada ranking",
    skip(service, claims, query, pelada_id),
    fields(player = %claims.name, pelada_id = %pelada_id)
)]
pub async fn get_pelada_ranking(
    pelada_id: Uuid,
    query: web::Query<RankingQuery>,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(requester) = requester_id(&claims) else {
        return Ok(invalid_claims());
    };

    match service
        .pelada_ranking(requester, pelada_id, &query, Utc::now().date_naive())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(ranking_error_response(&e)),
    }
}

pub async fn get_available_years(
    pelada_id: Uuid,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(requester) = requester_id(&claims) else {
        return Ok(invalid_claims());
    };

    match service.available_years(requester, pelada_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(ranking_error_response(&e)),
    }
}

pub async fn get_pelada_highlights(
    pelada_id: Uuid,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(requester) = requester_id(&claims) else {
        return Ok(invalid_claims());
    };

    match service
        .pelada_highlights(requester, pelada_id, Utc::now().date_naive())
        .await
    {
        Ok(highlights) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Pelada highlights retrieved",
            highlights,
        ))),
        Err(e) => Ok(ranking_error_response(&e)),
    }
}

pub async fn get_match_highlights(
    match_id: Uuid,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let Some(requester) = requester_id(&claims) else {
        return Ok(invalid_claims());
    };

    match service.match_highlights(requester, match_id).await {
        Ok(highlights) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Match highlights retrieved",
            highlights,
        ))),
        Err(e) => Ok(ranking_error_response(&e)),
    }
}

#[tracing::instrument(
    name = "Get player stats",
    skip(service, player_id),
    fields(player_id = %player_id)
)]
pub async fn get_player_stats(
    player_id: Uuid,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    match service.player_stats(player_id, Utc::now().date_naive()).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Player stats retrieved",
            stats,
        ))),
        Err(e) => Ok(ranking_error_response(&e)),
    }
}
