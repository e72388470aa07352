#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/qra-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod kind;
pub use kind::ErrorKind;

mod transform;
pub use transform::{Scaler, TransformError, Transformed};

mod forecaster;
pub use forecaster::QuantileForecaster;
