//! Affine scalar quantization, integer dot products over the codes, and min-max
//! feature scaling.
pub mod scheme;
pub mod codec;
pub mod dot;
pub mod vector;
pub mod collection;
pub mod scaler;

pub use codec::{backward, forward, forward_clamped};
pub use collection::QuantizedCollection;
pub use dot::{approximate_dot_product, cross_term, dot_error_bound, exact_dot, index_term};
pub use scaler::MinMaxScaler;
pub use scheme::{load_scheme, QuantizationScheme, RoundMode, SchemeBounds};
pub use vector::{dequantize_vector, quantize_vector, QuantizedVector};
