pub use shule_models::messages::*;
