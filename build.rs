use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");
    println!("cargo:rerun-if-env-changed=ALUMNI_API_BASE_URL");
    println!("cargo:rerun-if-env-changed=ALUMNI_RESEND_COOLDOWN_SECS");
    println!("cargo:rerun-if-env-changed=ALUMNI_REDIRECT_DELAY_MS");
    println!("cargo:rerun-if-env-changed=ALUMNI_REQUEST_TIMEOUT_MS");

    let sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if !output.status.success() {
                return None;
            }
            String::from_utf8(output.stdout)
                .ok()
                .map(|value| value.trim().to_string())
        })
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=ALUMNI_WEB_GIT_SHA={sha}");
}
