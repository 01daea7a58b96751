pub mod daily_log;
pub mod subject;
pub mod user;
