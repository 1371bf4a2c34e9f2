use crate::download::github::{ReleaseProvider, find_asset};
use crate::error::{GenerateError, GenerateResult};
use crate::registry::{AssetSource, get_tool_config};
use crate::script::{ScriptContext, build_script};
use crate::template::UrlTemplate;
use tracing::info;

/// Turns a tool name into its install script
#[derive(Debug)]
pub struct ScriptGenerator<P> {
    provider: P,
}

impl<P: ReleaseProvider> ScriptGenerator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Generate the install script for a registered tool
    ///
    /// Unknown tools fail before any request is made. Nothing is retried or
    /// recovered here: errors surface with their original message.
    pub fn generate_script(&self, tool_name: &str) -> GenerateResult<String> {
        let config = get_tool_config(tool_name)
            .ok_or_else(|| GenerateError::UnsupportedTool(tool_name.to_string()))?;

        let release = self.provider.fetch_latest_release(config.repository)?;
        let version = release.tag_name.as_str();

        let script = match config.source {
            AssetSource::CustomUrl { template } => {
                let template = UrlTemplate::parse(template);
                info!(
                    tool = tool_name,
                    version,
                    template = template.as_str(),
                    "Using custom download URL"
                );
                build_script(&ScriptContext::Dynamic {
                    tool_name,
                    version,
                    template: &template,
                })
            }
            AssetSource::ReleaseAsset { filter } => {
                let asset = find_asset(&release.assets, filter)?.ok_or_else(|| {
                    GenerateError::NoMatchingAsset {
                        tool: tool_name.to_string(),
                        filter: filter.to_string(),
                    }
                })?;
                info!(
                    tool = tool_name,
                    version,
                    asset = %asset.name,
                    "Selected release asset"
                );
                build_script(&ScriptContext::Standard {
                    tool_name,
                    file_name: &asset.name,
                    download_url: &asset.download_url,
                    version,
                })
            }
        };

        Ok(script)
    }
}
