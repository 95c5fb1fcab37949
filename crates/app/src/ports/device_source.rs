//! Device source port — fetch the full device list from the hub.

use std::future::Future;

use hubitat_exporter_domain::device::Devices;
use hubitat_exporter_domain::error::FetchError;

/// Fetches every device known to the hub.
///
/// Cancellation follows the future: dropping the returned future (e.g. when
/// the scrape request is abandoned) aborts the in-flight request.
/// Implementations are expected to bound the request with their own timeout.
pub trait DeviceSource {
    /// Fetch all devices.
    ///
    /// Transport failures surface as [`FetchError::Transport`], malformed
    /// payloads as [`FetchError::Decode`].
    fn fetch_devices(&self) -> impl Future<Output = Result<Devices, FetchError>> + Send;
}
