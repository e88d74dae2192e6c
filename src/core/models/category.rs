use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Food,
    Groceries,
    Transport,
    Lodging,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Groceries,
        Category::Transport,
        Category::Lodging,
        Category::Entertainment,
        Category::Other,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Food => "Food",
            Category::Groceries => "Groceries",
            Category::Transport => "Transport",
            Category::Lodging => "Lodging",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        };
        write!(f, "{}", s)
    }
}
