//! # qra
//!
//! Quantile regression averaging: turn a set of point forecasts into
//! probabilistic forecasts by regressing the realised value on the
//! forecasts, one quantile regression per quantile level.
//!
//! This crate provides a unified interface to the qra workspace.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Labelled tables and quantile levels
//! - `traits`: Scaler and forecaster abstractions
//! - `math`: Quantile regression, factor extraction and row statistics
//! - `scalers`: Preprocessing scalers
//! - `model`: QRA, QRM, FQRA and sFQRA models
//!
//! ## Example
//!
//! ```rust,ignore
//! use qra::model::prelude::*;
//!
//! let mut model = Sfqra::new(0.95, None)?;
//! model.fit(&forecasts, &realised)?;
//! let upper = model.predict(&next_forecasts)?;
//!
//! // Or with specific features only:
//! // [dependencies]
//! // qra = { version = "0.1", default-features = false, features = ["model"] }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use qra_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use qra_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use qra_math as math;
#[cfg(feature = "scalers")]
#[doc(inline)]
pub use qra_scalers as scalers;
#[cfg(feature = "model")]
#[doc(inline)]
pub use qra_model as model;
