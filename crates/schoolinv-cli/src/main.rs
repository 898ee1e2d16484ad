use schoolinv_core::api::ApiError;
use schoolinv_core::logging;

mod cli;

use crate::cli::CliCommand;

/// Lines printed for a failed command. Validation errors get one line per
/// field under a short headline instead of the joined field list.
fn error_lines(err: &anyhow::Error) -> Vec<String> {
    let Some(fields) = err
        .downcast_ref::<ApiError>()
        .and_then(ApiError::field_errors)
    else {
        return vec![format!("schoolinv error: {:#}", err)];
    };

    let mut headline: Vec<String> = err
        .chain()
        .take_while(|e| !e.is::<ApiError>())
        .map(|e| e.to_string())
        .collect();
    headline.push("validation failed".to_string());

    let mut lines = vec![format!("schoolinv error: {}", headline.join(": "))];
    lines.extend(fields.general.iter().map(|msg| format!("  {}", msg)));
    lines.extend(
        fields
            .fields
            .iter()
            .map(|(field, msg)| format!("  {}: {}", field, msg)),
    );
    lines
}

fn report(err: &anyhow::Error) {
    for line in error_lines(err) {
        eprintln!("{}", line);
    }
}

#[tokio::main]
async fn main() {
    // Fall back to stderr when the state dir is not writable.
    if let Err(e) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable: {:#}", e);
    }

    if let Err(err) = CliCommand::run_from_args().await {
        report(&err);
        std::process::exit(1);
    }
}
