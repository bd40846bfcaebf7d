use crate::api::{account, hod, leave};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    // Student and teacher facing routes
    cfg.service(web::resource("/login").route(web::post().to(account::login)))
        .service(web::resource("/studentData").route(web::get().to(account::student_data)))
        .service(web::resource("/searchStudent").route(web::get().to(account::search_student)))
        .service(web::resource("/teacherData").route(web::get().to(account::teacher_data)))
        .service(web::resource("/applyLeave").route(web::post().to(leave::apply_leave)))
        .service(
            web::resource("/studentLeaveRequests")
                .route(web::get().to(leave::student_leave_requests)),
        )
        .service(web::resource("/leaveHistory").route(web::get().to(leave::leave_history)))
        .service(
            web::resource("/viewLeaveRequests").route(web::get().to(leave::view_leave_requests)),
        )
        .service(
            web::resource("/updateLeaveRequest")
                .route(web::post().to(leave::update_leave_request)),
        );

    // HOD routes
    cfg.service(
        web::scope("/hod")
            .service(
                web::resource("/updateLeaveRequest")
                    .route(web::post().to(hod::update_leave_request)),
            )
            .service(
                web::resource("/viewLeaveRequests").route(web::get().to(hod::view_leave_requests)),
            )
            .service(web::resource("/leaveHistory").route(web::get().to(hod::leave_history))),
    );
}
