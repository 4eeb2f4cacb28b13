pub mod composition;
pub mod equivalence;
pub mod handlers;
pub mod pay;
