pub mod handlers;
pub mod offers;
pub mod vesting;
