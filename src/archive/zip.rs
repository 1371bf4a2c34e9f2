use crate::archive::utils::{find_binary_snippet, quoted};
use crate::script::shell::escape_double_quoted;

/// Unzip quietly and pull the tool out of the extracted tree
pub fn zip_snippet(file_name: &str, tool_name: &str) -> String {
    format!(
        "# Extract from zip\n\
         echo \"Extracting {bare}...\"\n\
         unzip -q {file}\n\
         {find}",
        bare = escape_double_quoted(file_name),
        file = quoted(file_name),
        find = find_binary_snippet(tool_name),
    )
}
