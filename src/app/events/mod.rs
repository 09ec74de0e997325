//! Intent-, Command- und Response-Enums für den Session-Datenfluss.

mod command;
mod intent;
mod response;

pub use command::SessionCommand;
pub use intent::SessionIntent;
pub(crate) use response::ServiceResponse;
