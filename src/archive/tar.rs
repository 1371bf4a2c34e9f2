use crate::archive::utils::{find_binary_snippet, quoted};

/// Extract a gzip-compressed tarball and pull the tool out of it
pub fn tar_gz_snippet(file_name: &str, tool_name: &str) -> String {
    tar_snippet("tar.gz", "-xzf", file_name, tool_name)
}

/// Extract an xz-compressed tarball and pull the tool out of it
pub fn tar_xz_snippet(file_name: &str, tool_name: &str) -> String {
    tar_snippet("tar.xz", "-xJf", file_name, tool_name)
}

fn tar_snippet(archive_type: &str, flags: &str, file_name: &str, tool_name: &str) -> String {
    let file = quoted(file_name);
    format!(
        "# Extract from {archive_type}\n\
         echo \"Extracting {bare}...\"\n\
         tar {flags} {file}\n\
         {find}",
        bare = crate::script::shell::escape_double_quoted(file_name),
        find = find_binary_snippet(tool_name),
    )
}
