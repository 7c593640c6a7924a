use std::process::ExitCode;

fn main() -> ExitCode {
    match tagpack::runtime::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tagpack: {e:#}");
            ExitCode::FAILURE
        }
    }
}
