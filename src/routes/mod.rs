use actix_web::web;

pub mod backend_health;
pub mod ranking;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Ranking routes (require authentication)
    cfg.service(
        web::scope("/ranking")
            .wrap(AuthMiddleware)
            .service(ranking::get_global_ranking)
            .service(ranking::get_available_years)
            .service(ranking::get_pelada_highlights)
            .service(ranking::get_pelada_ranking)
            .service(ranking::get_match_highlights)
    );

    // Player routes (require authentication)
    cfg.service(
        web::scope("/players")
            .wrap(AuthMiddleware)
            .service(ranking::get_player_stats)
    );
}
