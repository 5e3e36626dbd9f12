use actix_web::{
    delete, get,
    http::header::ContentType,
    post, put,
    web::{self, Bytes},
    HttpResponse,
};
use tracing::{info, warn};

use crate::error::ServiceError;
use crate::log::LogStore;
use crate::models::Envelope;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(read_logs)
        .service(create_logs)
        .service(update_logs)
        .service(update_logs_without_index)
        .service(delete_logs);
}

fn json_response(envelope: &Envelope) -> Result<HttpResponse, ServiceError> {
    let body = serde_json::to_vec(envelope)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

fn decode(bytes: &Bytes) -> Result<Envelope, ServiceError> {
    serde_json::from_slice(bytes).map_err(|e| ServiceError::BadInput(e.to_string()))
}

fn parse_index(raw: &str) -> Result<i64, ServiceError> {
    raw.parse::<i64>().map_err(|e| {
        warn!(order_id = raw, "invalid index in update");
        ServiceError::BadInput(format!("invalid index {:?}: {}", raw, e))
    })
}

#[get("/")]
pub async fn read_logs(store: web::Data<LogStore>) -> Result<HttpResponse, ServiceError> {
    info!("read begins");
    json_response(&store.read())
}

#[post("/")]
pub async fn create_logs(
    bytes: Bytes,
    store: web::Data<LogStore>,
) -> Result<HttpResponse, ServiceError> {
    info!("create begins");
    let request = decode(&bytes).map_err(|e| {
        warn!(error = %e, "create rejected");
        e
    })?;
    let id = request.id.clone();
    let envelope = store.create(&id, request.into_records());
    json_response(&envelope)
}

#[put("/{order_id}")]
pub async fn update_logs(
    order_id: web::Path<String>,
    bytes: Bytes,
    store: web::Data<LogStore>,
) -> Result<HttpResponse, ServiceError> {
    info!(order_id = %order_id, "update begins");
    let index = parse_index(&order_id)?;
    // a bad body only counts once the log is non-empty and the index valid
    match store.update(index, decode(&bytes)) {
        Ok(Some(envelope)) => json_response(&envelope),
        Ok(None) => Ok(HttpResponse::Ok().finish()),
        Err(e) => {
            warn!(error = %e, "update rejected");
            Err(e)
        }
    }
}

#[put("/")]
pub async fn update_logs_without_index() -> Result<HttpResponse, ServiceError> {
    warn!("update without index");
    Err(ServiceError::BadInput("missing index".to_string()))
}

#[delete("/")]
pub async fn delete_logs(store: web::Data<LogStore>) -> Result<HttpResponse, ServiceError> {
    info!("delete begins");
    let envelope = store.delete()?;
    json_response(&envelope)
}
