use std::process::ExitCode;

fn main() -> ExitCode {
    match chat_export_extractor::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
