pub mod inference_service;
pub mod studio_service;
