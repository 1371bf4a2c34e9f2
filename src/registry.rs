use crate::template::UrlTemplate;
use serde::Serialize;

/// Where a tool's binary is downloaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetSource {
    /// First release asset whose file name contains `filter`
    ReleaseAsset { filter: &'static str },
    /// URL built from a pattern with `{version}`, `{bare_version}`, `{os}` and `{arch}`
    CustomUrl { template: &'static str },
}

/// Static description of a supported tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolConfig {
    pub name: &'static str,
    /// GitHub repository in "owner/repo" format, queried for the latest release tag
    pub repository: &'static str,
    pub source: AssetSource,
}

impl ToolConfig {
    /// Substring filter for tools downloaded as release assets
    pub fn asset_filter(&self) -> Option<&'static str> {
        match self.source {
            AssetSource::ReleaseAsset { filter } => Some(filter),
            AssetSource::CustomUrl { .. } => None,
        }
    }

    /// Parsed download URL pattern for tools hosted outside GitHub releases
    pub fn url_template(&self) -> Option<UrlTemplate> {
        match self.source {
            AssetSource::ReleaseAsset { .. } => None,
            AssetSource::CustomUrl { template } => Some(UrlTemplate::parse(template)),
        }
    }
}

static TOOLS: &[ToolConfig] = &[
    ToolConfig {
        name: "kubectl",
        repository: "kubernetes/kubernetes",
        source: AssetSource::CustomUrl {
            template: "https://dl.k8s.io/release/{version}/bin/{os}/{arch}/kubectl",
        },
    },
    ToolConfig {
        name: "terraform",
        repository: "hashicorp/terraform",
        source: AssetSource::CustomUrl {
            template: "https://releases.hashicorp.com/terraform/{bare_version}/terraform_{bare_version}_{os}_{arch}.zip",
        },
    },
    ToolConfig {
        name: "helm",
        repository: "helm/helm",
        source: AssetSource::CustomUrl {
            template: "https://get.helm.sh/helm-{version}-{os}-{arch}.tar.gz",
        },
    },
    // Release-asset tools take the first matching asset in API order, whatever
    // platform it was built for; the script does not re-select at run time.
    ToolConfig {
        name: "node",
        repository: "nodejs/node",
        source: AssetSource::ReleaseAsset { filter: "node-" },
    },
    ToolConfig {
        name: "docker-compose",
        repository: "docker/compose",
        source: AssetSource::ReleaseAsset {
            filter: "docker-compose-",
        },
    },
];

/// Every registered tool, in registry order
pub fn all_tools() -> &'static [ToolConfig] {
    TOOLS
}

/// Get tool configuration by name
pub fn get_tool_config(name: &str) -> Option<&'static ToolConfig> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Get all supported tool names
pub fn supported_tools() -> Vec<&'static str> {
    TOOLS.iter().map(|tool| tool.name).collect()
}

/// Check if a tool is supported
pub fn is_tool_supported(name: &str) -> bool {
    get_tool_config(name).is_some()
}
