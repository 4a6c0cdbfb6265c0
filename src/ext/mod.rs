mod error_ext;
mod path_ext;

pub use error_ext::ErrorExt;
pub use path_ext::{PathExt, absolutize};
