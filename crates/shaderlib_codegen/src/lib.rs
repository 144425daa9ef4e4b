//! SPIR-V to C++ source converters.
//!
//! Two independent, stateless converters:
//!
//! | Converter | Input | Output |
//! |-----------|-------|--------|
//! | [`builtin_source`] | any number of stage binaries | one `.cpp` with byte arrays and `get_builtin_shader_binary` specializations |
//! | [`word_header`]    | exactly one binary           | one `.hpp` with a `constexpr` array of 32-bit words |
//!
//! Both render embedded minijinja templates (see [`templates`]) and are
//! deterministic for identical inputs.

pub mod builtin_source;
pub mod errors;
pub mod templates;
pub mod word_header;

pub use builtin_source::{BuiltinBinary, BuiltinSourceOptions, convert_builtin_source, render_builtin_source};
pub use errors::{CodegenError, Result};
pub use word_header::{convert_word_header, render_word_header, words_from_bytes};
