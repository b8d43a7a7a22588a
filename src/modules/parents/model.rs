pub use shule_models::reports::ParentDashboard;
