// Public modules
pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod generator;
pub mod models;
pub mod registry;
pub mod script;
pub mod server;
pub mod template;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use download::github::{GitHubClient, ReleaseProvider};
pub use error::{GenerateError, GenerateResult};
pub use generator::ScriptGenerator;
pub use models::*;

/// Generate the install script for `tool_name` against the public GitHub API
///
/// Picks up `GITHUB_TOKEN`/`GH_TOKEN` and `DXSH_API_URL` from the environment.
pub fn generate_script(tool_name: &str) -> GenerateResult<String> {
    let mut settings = Settings::default();
    settings.apply_env(|key| std::env::var(key).ok());
    ScriptGenerator::new(GitHubClient::new(&settings)).generate_script(tool_name)
}
