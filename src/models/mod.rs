pub mod daily_entry;
pub mod settings;
pub mod snapshot;
pub mod weekly_summary;
