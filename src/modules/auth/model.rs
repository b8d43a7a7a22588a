pub use shule_models::auth::*;
