use std::env;
use std::path::Path;

// Bakes a fallback workspace location into the binary for installs that run
// outside any checkout.
fn main() {
    println!("cargo:rerun-if-env-changed=LANGSCOPE_ROOT_HINT");

    let Ok(raw) = env::var("LANGSCOPE_ROOT_HINT") else {
        return;
    };
    let hint = Path::new(raw.trim());
    match hint.canonicalize() {
        Ok(root) if root.join("language").is_dir() => {
            println!("cargo:rustc-env=LANGSCOPE_ROOT_HINT={}", root.display());
        }
        _ => println!(
            "cargo:warning=LANGSCOPE_ROOT_HINT={} has no language/ directory; ignoring",
            hint.display()
        ),
    }
}
