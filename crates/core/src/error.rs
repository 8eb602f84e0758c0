/// Rule violations raised by the catalogue rules in this crate.
///
/// Missing rows are reported by the repositories, store failures by the
/// repositories and the image store; neither belongs here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
