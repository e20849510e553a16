pub mod term;
pub mod time;
