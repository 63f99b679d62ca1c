use clap::Subcommand;
use shiftboard_core::config::{ACCESS_TOKEN_ENV, COMPANY_ID_ENV};
use shiftboard_core::{Credentials, Settings};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings as JSON
    Show,
    /// Print the settings file location
    Path,
    /// Check that the API credentials are present
    Check,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load()?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigAction::Path => {
            println!("{}", Settings::path().display());
        }
        ConfigAction::Check => {
            let creds = Credentials::from_env()?;
            println!("{ACCESS_TOKEN_ENV}: set");
            println!("{COMPANY_ID_ENV}: {}", creds.company_id);
        }
    }
    Ok(())
}
