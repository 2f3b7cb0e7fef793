// Device requests for the LTE collector
//
// `/interface/lte/print =.proplist=name` lists the interfaces;
// `/interface/lte/monitor =once= =.id=<iface> =.proplist=<props>` takes a
// single synchronous snapshot of one interface.

use ltexporter_api::command::{ID, PROPLIST};
use ltexporter_api::{Command, Record};

use crate::context::ScrapeContext;
use crate::diagnostics::Outcome;
use crate::error::{CoreError, Operation};

pub const LIST_PATH: &str = "/interface/lte/print";
pub const MONITOR_PATH: &str = "/interface/lte/monitor";
const NAME: &str = "name";

/// Lists the LTE interfaces currently present on a device.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceEnumerator;

impl InterfaceEnumerator {
    /// The listing request, restricted to the `name` field.
    pub fn command(&self) -> Command {
        Command::new(LIST_PATH).proplist(&[NAME])
    }

    /// Interface identifiers in device order. An empty list is not an error.
    pub async fn list(&self, ctx: &ScrapeContext<'_>) -> Result<Vec<String>, CoreError> {
        ctx.report(None, None, Outcome::ListingInterfaces);

        let reply = ctx.session.run(&self.command()).await.map_err(|source| {
            ctx.report(None, None, Outcome::TransportFailed { error: &source });
            CoreError::Transport {
                device: ctx.device.name.clone(),
                operation: Operation::ListInterfaces,
                interface: None,
                source,
            }
        })?;

        let names: Vec<String> = reply
            .records()
            .iter()
            .filter_map(|r| r.raw(NAME))
            .map(str::to_owned)
            .collect();

        ctx.report(
            None,
            None,
            Outcome::InterfacesListed {
                interfaces: &names,
            },
        );
        Ok(names)
    }
}

/// Takes one-shot snapshots of a fixed property list.
#[derive(Debug, Clone)]
pub struct SnapshotFetcher {
    properties: Vec<&'static str>,
}

impl SnapshotFetcher {
    pub fn new(properties: Vec<&'static str>) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &[&'static str] {
        &self.properties
    }

    /// The monitor request for exactly `interface` and exactly the property list.
    pub fn command(&self, interface: &str) -> Command {
        Command::new(MONITOR_PATH)
            .flag("once")
            .attribute(ID, interface)
            .proplist(&self.properties)
    }

    /// Snapshot of `interface`, or `None` when the reply carried no records.
    ///
    /// Only the first record is used; the request addresses a single
    /// interface, so any further records are ignored.
    pub async fn fetch(
        &self,
        ctx: &ScrapeContext<'_>,
        interface: &str,
    ) -> Result<Option<Record>, CoreError> {
        let command = self.command(interface);
        ctx.report(
            Some(interface),
            None,
            Outcome::FetchingSnapshot {
                proplist: command.attribute_value(PROPLIST).unwrap_or_default(),
            },
        );

        let reply = ctx.session.run(&command).await.map_err(|source| {
            ctx.report(
                Some(interface),
                None,
                Outcome::TransportFailed { error: &source },
            );
            CoreError::Transport {
                device: ctx.device.name.clone(),
                operation: Operation::Snapshot,
                interface: Some(interface.to_owned()),
                source,
            }
        })?;

        let records = reply.len();
        let Some(record) = reply.into_records().into_iter().next() else {
            ctx.report(Some(interface), None, Outcome::EmptySnapshot);
            return Ok(None);
        };

        ctx.report(
            Some(interface),
            None,
            Outcome::SnapshotReceived { records },
        );
        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn listing_requests_only_names() {
        assert_eq!(
            InterfaceEnumerator.command().to_string(),
            "/interface/lte/print =.proplist=name"
        );
    }

    #[test]
    fn monitor_targets_one_interface_once() {
        let fetcher = SnapshotFetcher::new(vec!["rssi", "session-uptime"]);
        assert_eq!(
            fetcher.command("lte1").to_string(),
            "/interface/lte/monitor =once= =.id=lte1 =.proplist=rssi,session-uptime"
        );
    }
}
