//! Version command - Prints build and version.

/// Build identifier injected at compile time through `BUILD_NUMBER`.
pub const BUILD: &str = match option_env!("BUILD_NUMBER") {
    Some(build) => build,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render() -> String {
    format!("Build: {}\nVersion: {}", BUILD, VERSION)
}

/// Execute the version command
pub fn execute() {
    println!("{}", render());
}
