use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::ToSchema;

use crate::model::leave_request::{HodAction, LeaveRequest};
use crate::notify::Notifier;
use crate::service::leave::LeaveLifecycle;

#[derive(Deserialize, ToSchema)]
pub struct HodDecision {
    #[serde(rename = "requestId")]
    #[schema(example = "7f0763ae-7b3e-4f2c-9f59-6a8b0f3f2a11")]
    pub request_id: String,
    #[schema(example = "acceptedbyhod")]
    pub action: HodAction,
}

/// HOD decision on one request
#[utoipa::path(
    post,
    path = "/hod/updateLeaveRequest",
    request_body = HodDecision,
    responses(
        (status = 200, description = "Status updated", body = Object, example = json!({
            "message": "Leave request updated successfully."
        })),
        (status = 404, description = "No request with that id", body = Object, example = json!({
            "message": "Leave request not found."
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Error updating leave request."
        }))
    ),
    tag = "HOD"
)]
pub async fn update_leave_request(
    pool: web::Data<SqlitePool>,
    notifier: web::Data<Notifier>,
    payload: web::Json<HodDecision>,
) -> impl Responder {
    let result = LeaveLifecycle::hod_decision(
        pool.get_ref(),
        notifier.get_ref(),
        &payload.request_id,
        payload.action,
    )
    .await;

    match result {
        Ok(Some(_)) => HttpResponse::Ok().json(json!({
            "message": "Leave request updated successfully."
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "message": "Leave request not found."
        })),
        Err(e) => {
            error!(error = %e, request_id = %payload.request_id, "Failed to update leave request for HOD");
            HttpResponse::InternalServerError().json(json!({
                "message": "Error updating leave request."
            }))
        }
    }
}

/// The HOD queue, everything teachers forwarded
#[utoipa::path(
    get,
    path = "/hod/viewLeaveRequests",
    responses(
        (status = 200, description = "Forwarded leave requests", body = [LeaveRequest]),
        (status = 500, description = "Internal server error")
    ),
    tag = "HOD"
)]
pub async fn view_leave_requests(pool: web::Data<SqlitePool>) -> impl Responder {
    match LeaveLifecycle::forwarded_to_hod(pool.get_ref()).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => {
            error!(error = %e, "Failed to fetch forwarded leave requests");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// Requests the HOD already decided
#[utoipa::path(
    get,
    path = "/hod/leaveHistory",
    responses(
        (status = 200, description = "HOD-decided leave requests", body = [LeaveRequest]),
        (status = 500, description = "Internal server error")
    ),
    tag = "HOD"
)]
pub async fn leave_history(pool: web::Data<SqlitePool>) -> impl Responder {
    match LeaveLifecycle::hod_history(pool.get_ref()).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => {
            error!(error = %e, "Failed to fetch HOD leave history");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}
