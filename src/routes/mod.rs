use actix_web::web;

pub mod backend_health;
pub mod copa;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    // Management operations first so the scope isn't shadowed.
    cfg.service(web::scope("/copa/admin").service(copa::generate_knockout));

    cfg.service(
        web::scope("/copa")
            .service(copa::list_teams)
            .service(copa::list_stages)
            .service(copa::list_matches)
            .service(copa::update_match_result)
            .service(copa::list_bets)
            .service(copa::place_bet)
            .service(copa::list_extra_bets)
            .service(copa::place_extra_bet)
            .service(copa::get_ranking),
    );
}
