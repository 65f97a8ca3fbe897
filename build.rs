//! Build script for AutoFish
//! Embeds the Windows manifest and sets the application icon

fn main() {
    #[cfg(windows)]
    {
        embed_windows_resources();
    }
}

#[cfg(windows)]
fn embed_windows_resources() {
    let mut res = winres::WindowsResource::new();

    // Input is only delivered to a game running elevated when we are elevated too
    res.set_manifest_file("autofish.manifest");

    if std::path::Path::new("icons/icon.ico").exists() {
        res.set_icon("icons/icon.ico");
    }

    if let Err(e) = res.compile() {
        eprintln!("Warning: Failed to compile Windows resources: {}", e);
    }
}
