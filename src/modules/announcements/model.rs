pub use shule_models::announcements::*;
