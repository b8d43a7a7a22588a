pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use model::*;
pub use router::{
    init_application_review_router, init_applications_router, init_payments_router,
};
