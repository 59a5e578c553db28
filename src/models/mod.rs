pub mod invite;
pub mod participant;
pub mod trip;
