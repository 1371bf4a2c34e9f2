fn main() {
    // Release builds stamp DXSH_VERSION from CI; local builds keep the Cargo.toml version
    if let Ok(version) = std::env::var("DXSH_VERSION") {
        println!("cargo:rustc-env=CARGO_PKG_VERSION={version}");
    }
    println!("cargo:rerun-if-env-changed=DXSH_VERSION");
}
