pub mod configuration;
pub mod download;
pub mod error;
pub mod mangadex;
pub mod mangadex_client;
pub mod models;
pub mod run;

#[cfg(test)]
mod test_helpers;

pub use configuration::Settings;
pub use error::Error;
pub use models::Cli;
pub use run::run;
