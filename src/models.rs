use crate::error::{GenerateError, GenerateResult};
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (defaults to <config dir>/dxsh/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Base URL of the GitHub API
    #[arg(long, global = true)]
    pub api_url: Option<String>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the install script for a tool to stdout
    Script {
        /// Tool name, e.g. kubectl
        tool: String,
    },
    /// List the tools scripts can be generated for
    List {
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve scripts over HTTP at /{tool}
    Serve {
        /// Address to bind, e.g. 0.0.0.0:8080
        #[arg(short, long)]
        listen: Option<String>,
    },
}

/// Latest release of a repository, as much of it as script generation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub tag_name: String,
    pub name: String,
    pub assets: Vec<Asset>,
}

/// GitHub release asset information
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl Asset {
    pub fn new(name: &str, download_url: &str) -> Self {
        Self {
            name: name.to_string(),
            download_url: download_url.to_string(),
            size: None,
        }
    }
}

impl ReleaseInfo {
    /// Interpret a `releases/latest` response body
    ///
    /// A missing or empty `tag_name`, or a missing `assets`, is a shape error. An
    /// `assets` value that is present but not an array is rejected as asset input.
    /// Array entries without a string name and download URL are skipped.
    pub fn from_json(value: serde_json::Value) -> GenerateResult<Self> {
        let tag_name = value
            .get("tag_name")
            .and_then(|v| v.as_str())
            .filter(|tag| !tag.is_empty())
            .ok_or(GenerateError::InvalidResponseShape)?
            .to_string();

        let assets = match value.get("assets") {
            None | Some(serde_json::Value::Null) => {
                return Err(GenerateError::InvalidResponseShape);
            }
            Some(serde_json::Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| serde_json::from_value::<Asset>(entry.clone()).ok())
                .collect(),
            Some(_) => return Err(GenerateError::InvalidAssetsInput),
        };

        let name = value
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            tag_name,
            name,
            assets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_full_release() {
        let release = ReleaseInfo::from_json(json!({
            "tag_name": "v2.27.0",
            "name": "v2.27.0",
            "assets": [
                {
                    "name": "docker-compose-linux-x86_64",
                    "browser_download_url": "https://example.com/docker-compose-linux-x86_64",
                    "size": 61000000
                }
            ]
        }))
        .unwrap();

        assert_eq!(release.tag_name, "v2.27.0");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].size, Some(61000000));
        assert_eq!(
            release.assets[0].download_url,
            "https://example.com/docker-compose-linux-x86_64"
        );
    }

    #[test]
    fn test_from_json_missing_tag() {
        let result = ReleaseInfo::from_json(json!({ "assets": [] }));
        assert!(matches!(result, Err(GenerateError::InvalidResponseShape)));

        let result = ReleaseInfo::from_json(json!({ "tag_name": "", "assets": [] }));
        assert!(matches!(result, Err(GenerateError::InvalidResponseShape)));
    }

    #[test]
    fn test_from_json_missing_assets() {
        let result = ReleaseInfo::from_json(json!({ "tag_name": "v1.0.0" }));
        assert!(matches!(result, Err(GenerateError::InvalidResponseShape)));

        let result = ReleaseInfo::from_json(json!({ "tag_name": "v1.0.0", "assets": null }));
        assert!(matches!(result, Err(GenerateError::InvalidResponseShape)));
    }

    #[test]
    fn test_from_json_assets_not_array() {
        let result = ReleaseInfo::from_json(json!({ "tag_name": "v1.0.0", "assets": {} }));
        assert!(matches!(result, Err(GenerateError::InvalidAssetsInput)));
    }

    #[test]
    fn test_from_json_skips_malformed_assets() {
        let release = ReleaseInfo::from_json(json!({
            "tag_name": "v1.0.0",
            "assets": [
                null,
                { "name": 42, "browser_download_url": "https://example.com/a" },
                { "name": "tool.tar.gz" },
                { "name": "tool.zip", "browser_download_url": "https://example.com/tool.zip" }
            ]
        }))
        .unwrap();

        assert_eq!(release.name, "");
        assert_eq!(
            release.assets,
            vec![Asset::new("tool.zip", "https://example.com/tool.zip")]
        );
    }

    #[test]
    fn test_parse_script_command() {
        let args = Args::try_parse_from(["dxsh", "-vv", "script", "kubectl"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.command, Commands::Script { ref tool } if tool == "kubectl"));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "dxsh",
            "serve",
            "--listen",
            "0.0.0.0:9000",
            "--api-url",
            "http://localhost:1234",
        ])
        .unwrap();
        assert_eq!(args.api_url.as_deref(), Some("http://localhost:1234"));
        assert!(
            matches!(args.command, Commands::Serve { listen: Some(ref l) } if l == "0.0.0.0:9000")
        );
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Args::try_parse_from(["dxsh"]).is_err());
        assert!(Args::try_parse_from(["dxsh", "script"]).is_err());
    }
}
