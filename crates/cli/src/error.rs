use thiserror::Error;

/// Console failure that ends the session.
///
/// Domain errors never show up here; they are printed and the menu resumes.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Standard input reached end-of-file.
    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
