pub mod analyze_video_use_case;
pub mod detection_filter;
pub mod replay_session_use_case;
pub mod session_logger;
