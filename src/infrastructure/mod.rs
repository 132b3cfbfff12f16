pub mod config;
pub mod email;
pub mod logging;
pub mod platinum;
pub mod token_store;
