pub use shule_models::students::*;
