use visdata_stats::binning::BinSpecError;

/// Rejected input to a profile, histogram or plot attachment.
///
/// Raised before any state is built: a value either constructs completely or
/// not at all, and a plot attachment either draws every series or none.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum InvalidArgument {
    #[display("invalid bin specification: {_0}")]
    #[from]
    BinSpec(BinSpecError),
    #[display("x and y must have the same length (x: {x_len}, y: {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[display("at least one sample is required")]
    EmptyInput,
    #[display("unexpected keyword argument '{key}'")]
    UnknownKeyword { key: String },
    #[display("invalid value '{value}' for keyword '{key}'")]
    InvalidKeywordValue { key: String, value: String },
    #[display("unknown quantity '{name}'")]
    UnknownQuantity { name: String },
    #[display("unknown error quantity '{name}'")]
    UnknownErrorKind { name: String },
}

/// Checks that `x` and `y` pair up and are not empty.
pub(crate) fn check_samples(x: &[f64], y: &[f64]) -> Result<(), InvalidArgument> {
    if x.len() != y.len() {
        return Err(InvalidArgument::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(InvalidArgument::EmptyInput);
    }
    Ok(())
}
