pub mod db;
pub mod error;
pub mod store;
pub mod types;
pub mod validate;

pub use error::TicketError;
pub use store::TicketStore;
pub use types::{NewTicket, Ticket, TicketPatch};
