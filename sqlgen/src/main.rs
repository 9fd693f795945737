use analytics_sqlgen::core::SqlgenApp;

fn main() {
    if let Err(e) = SqlgenApp::run() {
        eprintln!("\nError: {:#}\n", e);
        std::process::exit(1);
    }
}
