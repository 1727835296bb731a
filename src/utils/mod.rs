mod logger;
mod tests;
mod time;

pub use logger::setup_logger;
pub use time::current_time_millis;
