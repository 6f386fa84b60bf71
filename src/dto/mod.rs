//! DTOs de la API
//!
//! Formas de request/response expuestas por la capa HTTP.

pub mod api_response;
pub mod auth_dto;
pub mod booking_dto;

pub use api_response::ApiResponse;
