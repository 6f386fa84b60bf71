pub mod auth_controller;
pub mod booking_controller;
pub mod dashboard_controller;
pub mod motorcycle_controller;
