pub mod invite;
pub mod mail;
pub mod storage;
