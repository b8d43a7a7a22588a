pub use shule_models::applications::*;
pub use shule_models::levels::EducationLevel;
pub use shule_models::students::Student;
