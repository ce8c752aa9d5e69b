pub mod artist_details;
pub mod baas;
pub mod config;
pub mod connectivity;
pub mod contact;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
