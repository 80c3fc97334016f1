pub mod clip_record;
pub mod setting;
