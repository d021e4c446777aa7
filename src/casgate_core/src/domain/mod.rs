pub mod destination;
pub mod identity;
pub mod lookup;
pub mod session;
pub mod ticket;
