use super::api::API;
use crate::config::Config;
use actix_cors::Cors;
use actix_web::web;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;

pub struct Server;

impl Server {
    pub async fn run() -> Result<(), std::io::Error> {
        let config = Config::from_env().expect("configuration");
        let addr = config.http.clone();
        let api = web::Data::new(API::new(config).await);
        log::info!("starting HTTP server on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(api.clone())
                .route("/", web::get().to(root))
                .route("/test", web::get().to(test))
                .route("/data", web::get().to(data))
        })
        .bind(addr)?
        .run()
        .await
    }
}

// Route handlers
async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "message": "API running" }))
}

async fn test(api: web::Data<API>) -> impl Responder {
    match api.ping().await {
        Err(e) => error(e),
        Ok(one) => HttpResponse::Ok().json(serde_json::json!({
            "status": "success",
            "result": [one],
        })),
    }
}

async fn data(api: web::Data<API>) -> impl Responder {
    match api.collection().await {
        Err(e) => error(e),
        Ok(collection) => HttpResponse::Ok().json(collection),
    }
}

/// Known failure paths still answer JSON, never a bare protocol error.
fn error(e: tokio_postgres::Error) -> HttpResponse {
    log::error!("query failed: {}", e);
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
}
