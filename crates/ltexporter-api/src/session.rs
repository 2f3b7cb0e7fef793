// Management session abstraction
//
// Connecting and logging in happen elsewhere; everything in this workspace
// receives an already-established session and only borrows it.

use futures_util::future::BoxFuture;

use crate::command::Command;
use crate::error::Error;
use crate::reply::Reply;

/// A live, authenticated management session to one device.
///
/// Object safe so scrape contexts can hold `&dyn Session`. Implementations
/// must answer with every `!re` record up to `!done`, and turn `!trap` /
/// `!fatal` into the matching [`Error`] variants.
pub trait Session: Send + Sync {
    /// Run one command to completion and collect its reply.
    fn run<'a>(&'a self, command: &'a Command) -> BoxFuture<'a, Result<Reply, Error>>;
}

impl<S: Session + ?Sized> Session for std::sync::Arc<S> {
    fn run<'a>(&'a self, command: &'a Command) -> BoxFuture<'a, Result<Reply, Error>> {
        (**self).run(command)
    }
}
