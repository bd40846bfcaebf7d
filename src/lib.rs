//! Student leave management backend.
//!
//! Students apply for leave, teachers accept, reject, or forward requests
//! to the head of department, and the HOD settles forwarded requests.
//! Every status change queues an SMS to the student behind the request.
//!
//! - [`model`]: account and leave-request records plus their queries
//! - [`service`]: the leave lifecycle state machine
//! - [`api`]: actix handlers mapping HTTP onto the service
//! - [`notify`]: the SMS queue and its Twilio delivery worker

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod model;
pub mod notify;
pub mod routes;
pub mod service;
