pub mod api;
pub mod prefs;
