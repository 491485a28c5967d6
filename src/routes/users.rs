use crate::{auth::AuthenticatedUserId, error::AppError, models::ProfileUpdate, store::Store};
use actix_web::{put, web, HttpResponse, Responder};
use validator::Validate;

/// Update the authenticated user's profile.
///
/// Overwrites username and role only; email and password are immutable
/// through the API. The caller must be the user being updated.
#[put("/{id}")]
pub async fn update_profile(
    store: web::Data<dyn Store>,
    user_id: web::Path<i32>,
    update: web::Json<ProfileUpdate>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    update.validate()?;

    let user_id = user_id.into_inner();
    if caller.0 != user_id {
        return Err(AppError::Forbidden(
            "You may only update your own profile".into(),
        ));
    }

    match store
        .update_profile(user_id, &update.username, &update.role)
        .await?
    {
        Some(summary) => Ok(HttpResponse::Ok().json(summary)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}
