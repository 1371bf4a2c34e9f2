pub mod platform;
pub mod shell;
pub mod verify;

use crate::archive::extraction_logic;
use crate::archive::utils::quoted;
use crate::template::UrlTemplate;
use crate::utils::get_filename_from_url;
use shell::escape_double_quoted;

/// Directory the generated script installs into
pub const INSTALL_DIR: &str = "/usr/local/bin";

/// OS and architecture used to discover the download file name of a URL template
pub const EXAMPLE_OS: &str = "linux";
pub const EXAMPLE_ARCH: &str = "amd64";

/// Inputs for one script
#[derive(Debug, Clone)]
pub enum ScriptContext<'a> {
    /// Download URL known up front, taken from a release asset
    Standard {
        tool_name: &'a str,
        file_name: &'a str,
        download_url: &'a str,
        version: &'a str,
    },
    /// Download URL that depends on the machine running the script
    Dynamic {
        tool_name: &'a str,
        version: &'a str,
        template: &'a UrlTemplate,
    },
}

/// One step of the install script, rendered in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Preamble,
    Announce { tool: String, version: String },
    DetectOs,
    DetectArch,
    NormalizeArch,
    ReportPlatform,
    /// `url` is already escaped for a double-quoted string and may reference `$OS`/`$ARCH`
    Download {
        tool: String,
        url: String,
        file_name: String,
    },
    Extract(String),
    Install { tool: String },
    Cleanup,
    Verify { tool: String },
    Success { tool: String },
}

impl Stage {
    fn render(&self) -> String {
        match self {
            Stage::Preamble => "#!/usr/bin/env bash\nset -e".to_string(),
            Stage::Announce { tool, version } => format!(
                "echo \"Installing {} {}...\"",
                escape_double_quoted(tool),
                escape_double_quoted(version)
            ),
            Stage::DetectOs => platform::detect_os_snippet(),
            Stage::DetectArch => platform::detect_arch_snippet(),
            Stage::NormalizeArch => platform::normalize_arch_snippet(),
            Stage::ReportPlatform => platform::report_platform_snippet(),
            Stage::Download {
                tool,
                url,
                file_name,
            } => format!(
                "# Download\n\
                 echo \"Downloading {}...\"\n\
                 TEMP_DIR=$(mktemp -d)\n\
                 cd \"$TEMP_DIR\"\n\
                 curl -fsSL \"{url}\" -o {}",
                escape_double_quoted(tool),
                quoted(file_name)
            ),
            Stage::Extract(snippet) => snippet.clone(),
            Stage::Install { tool } => {
                let target = quoted(&format!("{INSTALL_DIR}/{tool}"));
                format!(
                    "# Install to {INSTALL_DIR}\n\
                     echo \"Installing {} to {INSTALL_DIR}...\"\n\
                     sudo mv {} {target}\n\
                     sudo chmod +x {target}",
                    escape_double_quoted(tool),
                    quoted(tool)
                )
            }
            Stage::Cleanup => "# Cleanup\ncd - > /dev/null\nrm -rf \"$TEMP_DIR\"".to_string(),
            Stage::Verify { tool } => format!(
                "# Verify installation\n\
                 echo \"Verifying installation...\"\n\
                 {}",
                verify::version_check_command(tool)
            ),
            Stage::Success { tool } => format!(
                "echo \"{} installed successfully!\"",
                escape_double_quoted(tool)
            ),
        }
    }
}

/// An install script as an ordered list of stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallScript {
    stages: Vec<Stage>,
}

impl InstallScript {
    /// Lay out every stage for the given context
    pub fn new(context: &ScriptContext<'_>) -> Self {
        let (tool_name, version, url, file_name) = match context {
            ScriptContext::Standard {
                tool_name,
                file_name,
                download_url,
                version,
            } => (
                *tool_name,
                *version,
                escape_double_quoted(download_url),
                file_name.to_string(),
            ),
            ScriptContext::Dynamic {
                tool_name,
                version,
                template,
            } => {
                // OS and arch only vary at run time, so one concrete expansion is
                // enough to learn the file name and its extraction strategy
                let example = template.expand(version, EXAMPLE_OS, EXAMPLE_ARCH);
                let mut file_name = get_filename_from_url(&example);
                if file_name.is_empty() {
                    file_name = tool_name.to_string();
                }
                (
                    *tool_name,
                    *version,
                    template.expand_for_shell(version),
                    file_name,
                )
            }
        };

        let tool = tool_name.to_string();
        let extract = extraction_logic(&file_name, tool_name);

        Self {
            stages: vec![
                Stage::Preamble,
                Stage::Announce {
                    tool: tool.clone(),
                    version: version.to_string(),
                },
                Stage::DetectOs,
                Stage::DetectArch,
                Stage::NormalizeArch,
                Stage::ReportPlatform,
                Stage::Download {
                    tool: tool.clone(),
                    url,
                    file_name,
                },
                Stage::Extract(extract),
                Stage::Install { tool: tool.clone() },
                Stage::Cleanup,
                Stage::Verify { tool: tool.clone() },
                Stage::Success { tool },
            ],
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Flatten to the script text; stages are separated by a blank line
    pub fn render(&self) -> String {
        let mut script = self
            .stages()
            .iter()
            .map(Stage::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        script.push('\n');
        script
    }
}

/// Build the bash install script for a context
pub fn build_script(context: &ScriptContext<'_>) -> String {
    InstallScript::new(context).render()
}
