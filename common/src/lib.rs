pub mod float_ext;
pub mod log_setup;
pub mod test_utils;
pub mod toggle;

pub const EPSILON: f64 = 1e-9;
