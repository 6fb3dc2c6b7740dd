//! Application factory shared by the server and the integration tests.
//!
//! Only `recipe_service::` paths are used here so test crates can include
//! this file with `#[path]`.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use recipe_service::Trace;
#[cfg(debug_assertions)]
use recipe_service::doc::ApiDoc;
use recipe_service::inbound::http::error::{
    json_error_handler, path_error_handler, query_error_handler,
};
use recipe_service::inbound::http::health::{HealthState, live, ready};
use recipe_service::inbound::http::recipes::{
    create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe,
};
use recipe_service::inbound::http::session_config::SessionSettings;
use recipe_service::inbound::http::state::HttpState;
use recipe_service::inbound::http::users::{login, logout, register};

/// Everything a worker needs to build its copy of the app.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub session: SessionSettings,
}

/// Assemble routes, extractor error handlers and middleware.
///
/// `Trace` is registered last so it is the outermost layer and every
/// response, including session failures, carries a `trace-id`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let api = web::scope("/api")
        .service(create_recipe)
        .service(list_recipes)
        .service(get_recipe)
        .service(update_recipe)
        .service(delete_recipe);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(session.middleware())
        .wrap(Trace)
        .service(api)
        .service(register)
        .service(login)
        .service(logout)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}
