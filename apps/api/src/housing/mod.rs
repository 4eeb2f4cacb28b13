pub mod amortization;
pub mod handlers;
pub mod rent_vs_buy;
pub mod va_loan;
