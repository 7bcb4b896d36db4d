use serde::{Deserialize, Serialize};

/// Paired measurement samples, `x[i]` belonging to `y[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Samples {
    /// Independent variable
    pub x: Vec<f64>,
    /// Dependent variable
    pub y: Vec<f64>,
}
