pub mod balance;
pub mod category;
pub mod expense;
pub mod user;

pub use balance::{Balance, BalanceSummary, NetBalance, TotalsByPerson};
pub use category::Category;
pub use expense::{Expense, NewExpense, ReceiptEntry};
pub use user::User;
