use std::env;
use std::io;
use std::path::Path;
use std::sync::Arc;

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::ext::{ErrorExt, absolutize};
use crate::listing::{
    DirectoryLister, ListingError, ListingOutcome, ListingTarget, RecursiveLister,
    RecursiveListerCreationError, RecursiveListingError, TreeContext,
};
use crate::manifest::ManifestLoader;
use crate::render::Renderer;
use crate::resolver::{PathResolver, ResolveError};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let cwd = env::current_dir().context(CurrentDirSnafu)?;

        let outcome = Self::collect_listings(&app_config, &cwd).await?;

        let color = app_config.color.is_enabled();
        colored::control::set_override(color);
        let renderer = Renderer::new(color);
        renderer
            .render(&outcome.listings, &mut io::stdout().lock())
            .context(OutputSnafu)?;
        renderer
            .render_failures(&outcome.failures, &mut io::stderr().lock())
            .context(OutputSnafu)?;

        ensure!(
            outcome.failures.is_empty(),
            IncompleteListingSnafu {
                failed: outcome.failures.len()
            }
        );
        Ok(())
    }

    /// Produces the listings for the requested path as seen from `cwd`.
    pub async fn collect_listings(
        app_config: &RuntimeConfig,
        cwd: &Path,
    ) -> Result<ListingOutcome, ApplicationError> {
        let (tree, target) = Self::load_tree(app_config, cwd).await?;

        let lister = DirectoryLister::new(
            tree,
            app_config.listing,
            app_config.ordering.comparator(),
        );

        if !app_config.recurse {
            let listing = lister.list(&target).context(ListingSnafu)?;
            return Ok(ListingOutcome {
                listings: vec![listing],
                failures: Vec::new(),
            });
        }

        RecursiveLister::new(lister, app_config.max_depth)
            .context(RecursiveListerCreationSnafu)?
            .list(&target)
            .await
            .context(RecursiveListingSnafu)
    }

    /// Loads the manifest governing the requested path, if there is one, and
    /// places the path in that tree.
    ///
    /// Without a usable manifest the path is listed as a plain directory.
    async fn load_tree(
        app_config: &RuntimeConfig,
        cwd: &Path,
    ) -> Result<(Option<TreeContext>, ListingTarget), ApplicationError> {
        let requested = app_config.path.as_deref();
        let plain_target = || ListingTarget::new(PathResolver::absolute(requested, cwd), None);

        if app_config.listing.no_ghosts {
            debug!("Ghosts disabled, skipping manifest lookup");
            return Ok((None, plain_target()));
        }

        let search_boundary = app_config
            .search_boundary
            .as_deref()
            .map(|boundary| absolutize(boundary, cwd));
        let loader = ManifestLoader::new(search_boundary);

        let resolved = match PathResolver::new(&loader).resolve(requested, cwd) {
            Ok(resolved) => resolved,
            Err(ResolveError::ManifestNotFound { source }) => {
                debug!("{}, listing real entries only", source);
                return Ok((None, plain_target()));
            }
            Err(err) => return Err(err).context(ResolveSnafu),
        };
        info!(
            "Listing {} in tree {}",
            resolved.canonical,
            resolved.location.tree_root.display()
        );

        let manifest = match loader.load(&resolved.location).await {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!("{}, listing real entries only", err.chained_message());
                return Ok((None, ListingTarget::new(resolved.absolute, None)));
            }
        };
        debug!("Loaded manifest with {} units", manifest.len());

        let tree = TreeContext {
            root: resolved.location.tree_root,
            manifest: Arc::new(manifest),
        };
        let target = ListingTarget::new(resolved.absolute, Some(resolved.canonical));
        Ok((Some(tree), target))
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to obtain current dir"))]
    CurrentDirError { source: io::Error },
    #[snafu(display("Failed to resolve the requested path"))]
    ResolveError { source: ResolveError },
    #[snafu(display("Failed to list the requested path"))]
    ListingError { source: ListingError },
    #[snafu(display("Critical failure encountered while preparing the recursive listing"))]
    RecursiveListerCreationError {
        source: RecursiveListerCreationError,
    },
    #[snafu(display("Failed to list the requested path recursively"))]
    RecursiveListingError { source: RecursiveListingError },
    #[snafu(display("Failed to write the listing"))]
    OutputError { source: io::Error },
    #[snafu(display("{failed} directories could not be listed"))]
    IncompleteListingError { failed: usize },
}
