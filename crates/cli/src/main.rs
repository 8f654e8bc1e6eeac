use std::process::ExitCode;

fn main() -> ExitCode {
    wellnest_cli::run()
}
