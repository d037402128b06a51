use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    atelier_cli::run().await
}
