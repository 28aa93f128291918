uniffi::setup_scaffolding!();

mod types;

pub use types::{CorePattern, FfiError, FfiImage};
