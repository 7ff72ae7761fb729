use crate::error::RecallError;
use crate::shared::auth::protect_route;
use actix_web::{web, HttpRequest, HttpResponse};
use recall_api_structs::get_me::*;
use recall_infra::RecallContext;

pub async fn get_me_controller(
    http_req: HttpRequest,
    ctx: web::Data<RecallContext>,
) -> Result<HttpResponse, RecallError> {
    let user = protect_route(&http_req, &ctx).await?;

    Ok(HttpResponse::Ok().json(APIResponse::new(user)))
}
