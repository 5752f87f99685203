//! Codec decorators.
//!
//! Each decorator wraps another [`DataSource`](crate::storage::DataSource),
//! transforms values on `write` and applies the inverse on `read`:
//!
//! - [`TextEncoder`]: `String` ↔ bytes under a named [`TextEncoding`]
//! - [`XorCipher`]: bytes ↔ bytes under a repeating [`CipherKey`]
//!
//! Decorators never remap errors from the layer they wrap.

pub mod key;
pub mod text;
pub mod xor;

pub use key::CipherKey;
pub use text::{TextEncoder, TextEncoding};
pub use xor::{xor_apply, XorCipher};
