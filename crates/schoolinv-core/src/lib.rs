pub mod config;
pub mod logging;

pub mod api;
pub mod connectivity;
pub mod export;
pub mod models;
pub mod photo;
pub mod printer;
pub mod retry;
pub mod session;
pub mod sticker;
