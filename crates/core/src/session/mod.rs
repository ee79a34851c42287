pub mod observation;
pub mod session;
pub mod session_report;
pub mod shared_session;
