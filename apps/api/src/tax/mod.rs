pub mod brackets;
pub mod comparison;
pub mod fica;
pub mod handlers;
pub mod states;
