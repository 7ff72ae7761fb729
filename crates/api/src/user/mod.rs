mod create_user;
mod get_me;
mod get_users;

use actix_web::web;
use create_user::create_user_controller;
use get_me::get_me_controller;
use get_users::get_users_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user_controller));
    cfg.route("/users", web::get().to(get_users_controller));
    cfg.route("/users/me", web::get().to(get_me_controller));
}
