use serde::{Deserialize, Serialize};
use visdata_stats::binning::BinningStrategyKind;

use crate::InvalidArgument;

const STRATEGY_KEY: &str = "strategy";
const DEPRECATED_FILTER_KEY: &str = "numpy_bin_filter";

/// Construction options of a [`Profile2d`](crate::Profile2d).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOptions {
    /// How samples are partitioned into bins.
    pub strategy: BinningStrategyKind,
}

impl ProfileOptions {
    #[must_use]
    pub fn with_strategy(strategy: BinningStrategyKind) -> Self {
        Self { strategy }
    }

    /// Builds options from `key=value` style keyword pairs.
    ///
    /// Recognized keywords:
    ///
    /// - `strategy`: `vectorized` or `per-sample`
    /// - `numpy_bin_filter`: deprecated boolean alias (`true` selects the
    ///   vectorized strategy, `false` the per-sample one); logs a warning
    ///
    /// Any other keyword is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use visdata_profile::{InvalidArgument, ProfileOptions};
    /// use visdata_stats::binning::BinningStrategyKind;
    ///
    /// let options = ProfileOptions::from_keywords([("strategy", "per-sample")]).unwrap();
    /// assert_eq!(options.strategy, BinningStrategyKind::PerSample);
    ///
    /// let err = ProfileOptions::from_keywords([("bogus", "1")]).unwrap_err();
    /// assert!(matches!(err, InvalidArgument::UnknownKeyword { .. }));
    /// ```
    pub fn from_keywords<I, K, V>(keywords: I) -> Result<Self, InvalidArgument>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in keywords {
            let (key, value) = (key.as_ref().trim(), value.as_ref().trim());
            let invalid_value = || InvalidArgument::InvalidKeywordValue {
                key: key.to_owned(),
                value: value.to_owned(),
            };
            match key {
                STRATEGY_KEY => {
                    options.strategy = value.parse().map_err(|_| invalid_value())?;
                }
                DEPRECATED_FILTER_KEY => {
                    tracing::warn!(
                        "keyword '{DEPRECATED_FILTER_KEY}' is deprecated and will be removed in the future, use '{STRATEGY_KEY}' instead"
                    );
                    let vectorized = value.parse::<bool>().map_err(|_| invalid_value())?;
                    options.strategy = if vectorized {
                        BinningStrategyKind::Vectorized
                    } else {
                        BinningStrategyKind::PerSample
                    };
                }
                _ => {
                    return Err(InvalidArgument::UnknownKeyword {
                        key: key.to_owned(),
                    });
                }
            }
        }
        Ok(options)
    }
}
