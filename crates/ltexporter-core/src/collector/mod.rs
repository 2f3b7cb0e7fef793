// Collector variants
//
// The scheduler holds a list of `dyn Collector`s and calls `describe` once
// for registration and `collect` once per device per scrape.

pub mod lte;

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::context::ScrapeContext;
use crate::descriptor::PropertyDescriptor;
use crate::error::CoreError;

pub use lte::LteCollector;

/// One family of device metrics.
pub trait Collector: Send + Sync {
    /// Short name used in logs and scrape reports (`"lte"`).
    fn name(&self) -> &'static str;

    /// Every descriptor this collector can emit samples for.
    fn describe(&self) -> Vec<Arc<PropertyDescriptor>>;

    /// Scrape one device, writing samples to `ctx.sink`.
    ///
    /// Returns the first transport error encountered; samples already
    /// written stay written.
    fn collect<'a>(&'a self, ctx: &'a ScrapeContext<'a>) -> BoxFuture<'a, Result<(), CoreError>>;
}
