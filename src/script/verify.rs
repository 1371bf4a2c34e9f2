use crate::script::shell::escape_double_quoted;

/// Command that prints the installed tool's version without failing the script
pub fn version_check_command(tool_name: &str) -> String {
    let fallback = "echo \"Version check not available\"";
    let tool = escape_double_quoted(tool_name);
    match tool_name {
        "node" => format!("{tool} --version || {fallback}"),
        "kubectl" => format!("{tool} version --client || {fallback}"),
        _ => format!("{tool} --version || {tool} version || {fallback}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_cased_tools() {
        assert_eq!(
            version_check_command("node"),
            "node --version || echo \"Version check not available\""
        );
        assert!(version_check_command("kubectl").starts_with("kubectl version --client"));
    }

    #[test]
    fn test_default_chain() {
        assert_eq!(
            version_check_command("helm"),
            "helm --version || helm version || echo \"Version check not available\""
        );
    }
}
