use std::env;
use std::process::Command;

fn main() {
    // Record the compiler version for `textclass version`
    let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
    let version = Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=TEXTCLASS_RUSTC_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}
