use crate::script::shell::escape_double_quoted;

/// Wrap text in double quotes, escaped for bash
pub fn quoted(text: &str) -> String {
    format!("\"{}\"", escape_double_quoted(text))
}

/// Locate the tool anywhere in the extracted tree and move it to the working directory
///
/// Fails the script when the archive has no file with the tool's name.
pub fn find_binary_snippet(tool_name: &str) -> String {
    let tool = quoted(tool_name);
    let bare = escape_double_quoted(tool_name);
    format!(
        "# Find the binary (may be in subdirectory)\n\
         BINARY=$(find . -name {tool} -type f | head -n 1)\n\
         if [ -z \"$BINARY\" ]; then\n  \
           echo \"Error: Could not find {bare} binary in archive\"\n  \
           exit 1\n\
         fi\n\
         if [ \"$BINARY\" != \"./{bare}\" ]; then\n  \
           mv \"$BINARY\" {tool}\n\
         fi"
    )
}

/// Decompress a lone `.gz` file and rename the result to the tool name
pub fn gunzip_snippet(file_name: &str, tool_name: &str) -> String {
    let extracted = file_name.strip_suffix(".gz").unwrap_or(file_name);
    let mut snippet = format!(
        "# Extract from gz\n\
         echo \"Extracting {bare}...\"\n\
         gunzip {file}",
        bare = escape_double_quoted(file_name),
        file = quoted(file_name),
    );
    if extracted != tool_name {
        snippet.push_str(&format!(
            "\nmv {} {}",
            quoted(extracted),
            quoted(tool_name)
        ));
    }
    snippet
}

/// The download is the executable itself
pub fn raw_binary_snippet(file_name: &str, tool_name: &str) -> String {
    if file_name == tool_name {
        return format!(
            "# File is a raw binary already named {}",
            escape_double_quoted(tool_name)
        );
    }
    format!(
        "# File is a raw binary\nmv {} {}",
        quoted(file_name),
        quoted(tool_name)
    )
}
