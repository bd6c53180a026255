use std::process::ExitCode;

fn main() -> ExitCode {
    match taskboard_core::run(std::env::args_os().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskboard: {err:#}");
            ExitCode::FAILURE
        }
    }
}
