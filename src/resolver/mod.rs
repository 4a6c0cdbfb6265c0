mod path_resolver;

pub use path_resolver::{CanonicalPath, PathResolver, ResolveError};
