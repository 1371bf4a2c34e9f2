/// Kernel-reported machine names and the names release assets use for them
pub const ARCH_ALIASES: &[(&str, &str)] = &[("x86_64", "amd64"), ("aarch64", "arm64")];

pub fn detect_os_snippet() -> String {
    "# Detect OS\n\
     OS=$(uname -s | tr '[:upper:]' '[:lower:]')\n\
     if [ -z \"$OS\" ]; then\n  \
       echo \"Error: Failed to detect operating system\"\n  \
       exit 1\n\
     fi"
    .to_string()
}

pub fn detect_arch_snippet() -> String {
    "# Detect Architecture\n\
     ARCH=$(uname -m)\n\
     if [ -z \"$ARCH\" ]; then\n  \
       echo \"Error: Failed to detect architecture\"\n  \
       exit 1\n\
     fi"
    .to_string()
}

/// `case` statement applying [`ARCH_ALIASES`] to `$ARCH`
pub fn normalize_arch_snippet() -> String {
    let mut snippet = String::from("# Normalize architecture names\ncase \"$ARCH\" in\n");
    for (kernel, release) in ARCH_ALIASES {
        snippet.push_str(&format!("  {kernel})\n    ARCH=\"{release}\"\n    ;;\n"));
    }
    snippet.push_str("esac");
    snippet
}

pub fn report_platform_snippet() -> String {
    "echo \"Detected OS: $OS\"\necho \"Detected Architecture: $ARCH\"".to_string()
}
