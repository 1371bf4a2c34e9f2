pub mod tar;
pub mod utils;
pub mod zip;

/// How a downloaded file is turned into a single executable named after the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    TarGz,
    TarXz,
    Zip,
    /// Single gzip-compressed file, not a tarball
    Gz,
    /// Already the executable
    Raw,
}

impl ExtractionStrategy {
    /// Pick the strategy from the file name suffix; anything unrecognised is a raw binary
    pub fn for_file_name(file_name: &str) -> Self {
        if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
            ExtractionStrategy::TarGz
        } else if file_name.ends_with(".tar.xz") || file_name.ends_with(".txz") {
            ExtractionStrategy::TarXz
        } else if file_name.ends_with(".zip") {
            ExtractionStrategy::Zip
        } else if file_name.ends_with(".gz") {
            // .tar.gz was matched above
            ExtractionStrategy::Gz
        } else {
            ExtractionStrategy::Raw
        }
    }

    /// Bash commands that leave `tool_name` in the current directory
    pub fn snippet(&self, file_name: &str, tool_name: &str) -> String {
        match self {
            ExtractionStrategy::TarGz => tar::tar_gz_snippet(file_name, tool_name),
            ExtractionStrategy::TarXz => tar::tar_xz_snippet(file_name, tool_name),
            ExtractionStrategy::Zip => zip::zip_snippet(file_name, tool_name),
            ExtractionStrategy::Gz => utils::gunzip_snippet(file_name, tool_name),
            ExtractionStrategy::Raw => utils::raw_binary_snippet(file_name, tool_name),
        }
    }
}

/// Extraction commands for a downloaded file
pub fn extraction_logic(file_name: &str, tool_name: &str) -> String {
    ExtractionStrategy::for_file_name(file_name).snippet(file_name, tool_name)
}
