#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/qra-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cross_section;
pub use cross_section::{XSectionScale, standardize_xsection, xsection_mean, xsection_std};

mod clip;
pub use clip::{Clipper, clip_symmetric};

mod linalg;
pub use linalg::{column_rank, symmetric_eigen};

mod quantreg;
pub use quantreg::{QuantRegConfig, QuantRegResult, pinball_loss, quantile_regression};

mod factor;
pub use factor::{FactorBasis, FactorSelection, extract_factors, factor_bic, select_n_factors};

mod error;
pub use error::MathError;
