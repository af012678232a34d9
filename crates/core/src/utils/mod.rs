pub mod input_utils;
pub mod time_utils;
