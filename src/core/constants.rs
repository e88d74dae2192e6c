/// Net balances and transfers within this distance of zero count as settled.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Fixed key the expense list is persisted under.
pub const STORAGE_KEY: &str = "@split_expenses";

pub const MAX_DESCRIPTION_LENGTH: usize = 255;

pub const DEFAULT_ROSTER: &str = "1:Juan,2:María,3:Pedro";

// Action names attached to tracing events
pub const EXPENSE_ADDED: &str = "expense_added";
pub const EXPENSES_LOADED: &str = "expenses_loaded";
pub const EXPENSES_SAVE_FAILED: &str = "expenses_save_failed";
pub const BALANCES_QUERIED: &str = "balances_queried";
pub const REPORT_GENERATED: &str = "report_generated";
