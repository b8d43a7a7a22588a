pub use shule_models::reports::{HeadmasterDashboard, SecretaryReport};
