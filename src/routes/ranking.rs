// src/routes/ranking.rs
// Mounted under `/ranking`, except `get_player_stats` which lives under `/players`.
use actix_web::{get, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::ranking_handler;
use crate::middleware::auth::Claims;
use crate::models::ranking::RankingQuery;
use crate::services::RankingService;

/// Global ranking across every pelada
#[get("/global")]
async fn get_global_ranking(
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ranking_handler::get_global_ranking(service, claims).await
}

/// Pelada ranking, `?tipo=geral|ano|mes&ano=YYYY`
#[get("/pelada/{pelada_id}")]
async fn get_pelada_ranking(
    path: web::Path<Uuid>,
    query: web::Query<RankingQuery>,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let pelada_id = path.into_inner();
    ranking_handler::get_pelada_ranking(pelada_id, query, service, claims).await
}

/// Years with finalized matches, for the year selector
#[get("/pelada/{pelada_id}/anos")]
async fn get_available_years(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let pelada_id = path.into_inner();
    ranking_handler::get_available_years(pelada_id, service, claims).await
}

#[get("/pelada/{pelada_id}/destaques")]
async fn get_pelada_highlights(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let pelada_id = path.into_inner();
    ranking_handler::get_pelada_highlights(pelada_id, service, claims).await
}

#[get("/partida/{match_id}/destaques")]
async fn get_match_highlights(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let match_id = path.into_inner();
    ranking_handler::get_match_highlights(match_id, service, claims).await
}

#[get("/{player_id}/stats")]
async fn get_player_stats(
    path: web::Path<Uuid>,
    service: web::Data<RankingService>,
) -> Result<HttpResponse> {
    let player_id = path.into_inner();
    ranking_handler::get_player_stats(player_id, service).await
}
