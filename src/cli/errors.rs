use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Max size must be greater than 0, got: {size}")]
    ZeroSize { size: usize },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Nothing to do: pass --input/--output, --input-dir/--output-dir, --legend or --list-schemes")]
    NothingToDo,
}

/// Message shown to the user for a failed run. Library errors are translated so that no
/// internal detail leaks; CLI errors are already phrased for the user.
pub fn user_message(err: &(dyn std::error::Error + 'static)) -> String {
    match err.downcast_ref::<radiochrome::Error>() {
        Some(e) => e.user_message(),
        None => err.to_string(),
    }
}
