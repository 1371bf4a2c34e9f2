/// Extract the file name from a download URL, ignoring any query string or fragment
pub fn get_filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path).to_string()
}
