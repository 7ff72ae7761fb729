use crate::error::RecallError;
use actix_web::HttpRequest;
use recall_domain::{User, ID};
use recall_infra::RecallContext;

/// Header set by the auth gateway in front of this service. Who
/// authenticated the user is not this service's concern.
const IDENTITY_HEADER: &str = "recall-user-id";

/// Resolves the calling `User` from the identity header. Rejects
/// requests without the header and requests for unknown users.
pub async fn protect_route(
    http_req: &HttpRequest,
    ctx: &RecallContext,
) -> Result<User, RecallError> {
    let user_id = match http_req.headers().get(IDENTITY_HEADER) {
        Some(value) => value.to_str().map_err(|_| {
            RecallError::Unauthorized(format!(
                "Malformed `{}` header provided",
                IDENTITY_HEADER
            ))
        })?,
        None => {
            return Err(RecallError::Unauthorized(format!(
                "Missing `{}` header",
                IDENTITY_HEADER
            )))
        }
    };

    let user_id = user_id.parse::<ID>().map_err(|_| {
        RecallError::Unauthorized(format!(
            "Malformed user id in `{}` header",
            IDENTITY_HEADER
        ))
    })?;

    ctx.repos.users.find(&user_id).await.ok_or_else(|| {
        RecallError::Unauthorized(format!("No user found with id: {}", user_id))
    })
}

/// Restricts a route to admins.
pub fn ensure_admin(user: &User) -> Result<(), RecallError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(RecallError::Unauthorized(
            "Only admins are permitted to perform this action".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use recall_domain::UserRole;

    #[actix_web::test]
    async fn rejects_missing_and_unknown_identities() {
        let ctx = RecallContext::create_inmemory();

        let req = TestRequest::default().to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());

        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, "not-a-user-id"))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());

        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, ID::new().as_string()))
            .to_http_request();
        assert!(protect_route(&req, &ctx).await.is_err());
    }

    #[actix_web::test]
    async fn resolves_known_identities() {
        let ctx = RecallContext::create_inmemory();
        let user = User::new("Ana".into(), "ana@example.org".into(), UserRole::Member);
        ctx.repos.users.insert(&user).await.unwrap();

        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, user.id.as_string()))
            .to_http_request();
        let found = protect_route(&req, &ctx).await.expect("To resolve user");
        assert_eq!(found.id, user.id);
    }

    #[test]
    fn admin_guard() {
        let admin = User::new("Root".into(), "root@example.org".into(), UserRole::Admin);
        let member = User::new("Ana".into(), "ana@example.org".into(), UserRole::Member);
        assert!(ensure_admin(&admin).is_ok());
        assert!(ensure_admin(&member).is_err());
    }
}
