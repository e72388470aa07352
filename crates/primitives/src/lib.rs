#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/qra-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod quantile;
pub use quantile::{Quantile, Quantiles};

mod table;
pub use table::Table;

mod error;
pub use error::PrimitiveError;
