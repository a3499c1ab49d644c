fn main() {
    // Expose the build timestamp for --version output
    let build_date = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
    println!("cargo:rustc-env=BUILD_DATE={build_date}");
}
