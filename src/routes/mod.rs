pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

/// Wires every handler under the `/api` scope.
///
/// Register and login sit at the scope root; `AuthMiddleware` (applied by the
/// caller around this scope) lets those two through and guards the rest.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(web::scope("/users").service(users::update_profile))
        .service(
            web::scope("/tasks")
                .service(tasks::list_tasks)
                .service(tasks::create_task)
                .service(tasks::update_status)
                .service(tasks::delete_task),
        );
}
