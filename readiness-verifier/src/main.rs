use clap::Parser;
use readiness_verifier::cli::Cli;
use std::process::ExitCode;
use verifier_core::verifier::CONFIGURATION_EXIT_CODE;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // clap exits with 2 on usage errors, which would read as "unreachable"
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                CONFIGURATION_EXIT_CODE
            } else {
                0
            };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    readiness_verifier::run(cli).await
}
