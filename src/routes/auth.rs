use crate::{
    auth::{
        generate_token, hash_password, verify_password, LoginRequest, LoginResponse,
        RegisterRequest,
    },
    config::Config,
    error::AppError,
    models::user::DEFAULT_ROLE,
    store::Store,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

/// Single message for every registration failure: callers cannot tell a
/// duplicate email from a malformed payload.
const CREATION_ERROR: &str = "Account creation failed (email already taken?)";

/// Register a new user
///
/// Hashes the password and persists the account with the default role.
#[post("/register")]
pub async fn register(
    store: web::Data<dyn Store>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    if register_data.validate().is_err() {
        return Err(AppError::BadRequest(CREATION_ERROR.into()));
    }

    let password_hash = hash_password(&register_data.password)?;

    match store
        .create_user(
            &register_data.username,
            &register_data.email,
            &password_hash,
            DEFAULT_ROLE,
        )
        .await
    {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({ "message": "User created" }))),
        Err(AppError::Conflict(_)) => Err(AppError::BadRequest(CREATION_ERROR.into())),
        Err(e) => Err(e),
    }
}

/// Login user
///
/// Verifies credentials and returns a bearer token plus the user summary the
/// client caches. Unknown email and wrong password produce distinct messages
/// but the same 400 status.
#[post("/login")]
pub async fn login(
    store: web::Data<dyn Store>,
    config: web::Data<Config>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = match store.find_user_by_email(&login_data.email).await? {
        Some(user) => user,
        None => return Err(AppError::BadRequest("Unknown user".into())),
    };

    if !verify_password(&login_data.password, &user.password_hash)? {
        return Err(AppError::BadRequest("Incorrect password".into()));
    }

    let token = generate_token(user.id, &config.jwt_secret)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: user.into(),
    }))
}
