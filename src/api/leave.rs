use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::model::leave_request::{ApplyLeave, LeaveRequest, TeacherAction};
use crate::notify::Notifier;
use crate::service::leave::LeaveLifecycle;

#[derive(Deserialize, IntoParams)]
pub struct EmailQuery {
    /// Student email whose requests to list
    pub email: String,
}

#[derive(Deserialize, IntoParams)]
pub struct ClassQuery {
    /// Class whose pending requests to list
    pub class: String,
}

#[derive(Deserialize, ToSchema)]
pub struct TeacherDecision {
    #[serde(rename = "requestId")]
    #[schema(example = "7f0763ae-7b3e-4f2c-9f59-6a8b0f3f2a11")]
    pub request_id: String,
    #[schema(example = "accept")]
    pub action: TeacherAction, // enum ensures Swagger dropdown
}

/* =========================
Apply leave
========================= */
/// Swagger doc for apply_leave endpoint
#[utoipa::path(
    post,
    path = "/applyLeave",
    request_body(
        content = ApplyLeave,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave applied successfully",
         body = Object,
         example = json!({
            "message": "Leave applied successfully",
            "id": "7f0763ae-7b3e-4f2c-9f59-6a8b0f3f2a11"
         })
        ),
        (status = 404, description = "No account for the given email", body = Object, example = json!({
            "message": "Student not found."
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn apply_leave(
    pool: web::Data<SqlitePool>,
    notifier: web::Data<Notifier>,
    payload: web::Json<ApplyLeave>,
) -> impl Responder {
    let result =
        LeaveLifecycle::apply(pool.get_ref(), notifier.get_ref(), payload.into_inner()).await;

    match result {
        Ok(Some(request)) => HttpResponse::Ok().json(json!({
            "message": "Leave applied successfully",
            "id": request.id
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "message": "Student not found."
        })),
        Err(e) => {
            error!(error = %e, "Failed to apply leave");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}

/* =========================
Student listings
========================= */
/// Requests of one student, most recent first
#[utoipa::path(
    get,
    path = "/studentLeaveRequests",
    params(EmailQuery),
    responses(
        (status = 200, description = "Leave requests, newest first", body = [LeaveRequest]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn student_leave_requests(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    match LeaveLifecycle::requests_for_student(pool.get_ref(), &query.email).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => {
            error!(error = %e, "Failed to fetch leave requests");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// Full request history of one student
#[utoipa::path(
    get,
    path = "/leaveHistory",
    params(EmailQuery),
    responses(
        (status = 200, description = "Leave requests, unspecified order", body = [LeaveRequest]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn leave_history(
    pool: web::Data<SqlitePool>,
    query: web::Query<EmailQuery>,
) -> impl Responder {
    match LeaveLifecycle::history_for_student(pool.get_ref(), &query.email).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => {
            error!(error = %e, "Failed to fetch leave history");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal server error"
            }))
        }
    }
}

/* =========================
Teacher queue and decision
========================= */
/// Pending requests of one class
#[utoipa::path(
    get,
    path = "/viewLeaveRequests",
    params(ClassQuery),
    responses(
        (status = 200, description = "Pending leave requests of the class", body = [LeaveRequest]),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Error fetching leave requests."
        }))
    ),
    tag = "Leave"
)]
pub async fn view_leave_requests(
    pool: web::Data<SqlitePool>,
    query: web::Query<ClassQuery>,
) -> impl Responder {
    match LeaveLifecycle::pending_for_class(pool.get_ref(), &query.class).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(e) => {
            error!(error = %e, class = %query.class, "Failed to fetch pending leave requests");
            HttpResponse::InternalServerError().json(json!({
                "message": "Error fetching leave requests."
            }))
        }
    }
}

/// Teacher decision on one request
#[utoipa::path(
    post,
    path = "/updateLeaveRequest",
    request_body = TeacherDecision,
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
    tag = "Leave"
)]
pub async fn update_leave_request(
    pool: web::Data<SqlitePool>,
    notifier: web::Data<Notifier>,
    payload: web::Json<TeacherDecision>,
) -> impl Responder {
    let result = LeaveLifecycle::teacher_decision(
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
            error!(error = %e, request_id = %payload.request_id, "Failed to update leave request");
            HttpResponse::InternalServerError().json(json!({
                "message": "Error updating leave request."
            }))
        }
    }
}
