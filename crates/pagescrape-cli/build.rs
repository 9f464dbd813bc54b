use chrono::Local;
use std::process::Command;

fn git(args: &[&str]) -> Option<std::process::Output> {
    Command::new("git").args(args).output().ok()
}

fn main() {
    // Short commit hash, or "unknown" outside a git checkout
    let hash = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(out) if out.status.success() => {
            String::from_utf8_lossy(&out.stdout).trim().to_string()
        }
        _ => "unknown".to_string(),
    };

    // Tracked files modified since HEAD (untracked files don't count)
    let dirty = hash != "unknown"
        && git(&["diff", "--quiet", "HEAD"]).is_some_and(|out| !out.status.success());

    let build_hash = if dirty {
        format!("{hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        hash
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // .git lives at the workspace root, two levels up
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
