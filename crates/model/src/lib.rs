#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/qra-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod config;
pub use config::{FqraConfig, QraConfig};

mod error;
pub use error::ModelError;

mod qra;
pub use qra::Qra;

mod qrm;
pub use qrm::Qrm;

mod fqra;
pub use fqra::Fqra;

mod sfqra;
pub use sfqra::Sfqra;

/// Re-export commonly used types.
pub mod prelude {
    pub use qra_traits::QuantileForecaster;

    pub use super::{Fqra, FqraConfig, ModelError, Qra, QraConfig, Qrm, Sfqra};
}
