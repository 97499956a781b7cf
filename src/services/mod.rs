pub mod display_helpers;
pub mod grading;
pub mod quiz_clock;
pub mod quiz_engine;
pub mod quiz_service;
pub mod quiz_session;
