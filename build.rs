#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // Embed version info into pontolog.exe
    let mut res = WindowsResource::new();
    res.set("FileDescription", "Pontolog CLI")
        .set("ProductName", "Pontolog")
        .set("OriginalFilename", "pontolog.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed version resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
