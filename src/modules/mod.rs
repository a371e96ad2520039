pub mod auth;
pub mod news;
pub mod projects;
pub mod scripts;
pub mod social;
pub mod transcript;
pub mod uploads;
pub mod videos;
