pub mod claimed_event;
pub mod distributor;
