use crate::api::account::{LoginRequest, StudentProfile};
use crate::api::hod::HodDecision;
use crate::api::leave::TeacherDecision;
use crate::model::account::Account;
use crate::model::leave_request::{ApplyLeave, HodAction, LeaveRequest, TeacherAction};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Leave Management API",
        version = "1.0.0",
        description = r#"
## Student Leave Management System

This API powers a **leave management** backend for an educational institution.

### 🔹 Key Features
- **Accounts**
  - Login and profile lookups for students and teachers
- **Leave Requests**
  - Students apply for leave and track their requests
  - Teachers accept, reject, or forward requests to the HOD
  - The HOD decides on forwarded requests
- **SMS Notifications**
  - Students are notified by SMS on every status change

### 📦 Response Format
- JSON-based RESTful responses
- Leave listings are returned as plain arrays

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::account::login,
        crate::api::account::student_data,
        crate::api::account::search_student,
        crate::api::account::teacher_data,

        crate::api::leave::apply_leave,
        crate::api::leave::student_leave_requests,
        crate::api::leave::leave_history,
        crate::api::leave::view_leave_requests,
        crate::api::leave::update_leave_request,

        crate::api::hod::update_leave_request,
        crate::api::hod::view_leave_requests,
        crate::api::hod::leave_history
    ),
    components(
        schemas(
            Account,
            StudentProfile,
            LoginRequest,
            LeaveRequest,
            ApplyLeave,
            TeacherAction,
            TeacherDecision,
            HodAction,
            HodDecision
        )
    ),
    tags(
        (name = "Auth", description = "Login APIs"),
        (name = "Students", description = "Student profile APIs"),
        (name = "Teachers", description = "Teacher profile APIs"),
        (name = "Leave", description = "Leave application and teacher decision APIs"),
        (name = "HOD", description = "HOD queue and decision APIs"),
    )
)]
pub struct ApiDoc;
