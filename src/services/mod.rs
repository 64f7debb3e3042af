pub mod recipe_service;
pub mod report_service;
pub mod user_service;
