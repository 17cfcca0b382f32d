//! Destinations, key bundles and the control-channel client
//!
//! - [`address`]: destination text/bytes/hash conversions and the short form
//! - [`keys`]: key bundles, their two-line file format and signing
//! - [`control`]: destination generation and name lookup against a router

pub mod address;
pub mod control;
pub mod keys;

pub use address::{AddressError, Destination, DestinationHash};
pub use control::{ControlClient, ControlError};
pub use keys::{DestinationSigner, KeyBundle, KeyBundleError, KeyFile};
pub use i2pkeys_common::{AddressFormat, ErrorKind};
