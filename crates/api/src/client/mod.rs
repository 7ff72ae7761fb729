mod create_client;
mod get_client;
mod get_clients;

use actix_web::web;
use create_client::create_client_controller;
use get_client::get_client_controller;
use get_clients::get_clients_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/clients", web::post().to(create_client_controller));
    cfg.route("/clients", web::get().to(get_clients_controller));
    cfg.route("/clients/{client_id}", web::get().to(get_client_controller));
}
