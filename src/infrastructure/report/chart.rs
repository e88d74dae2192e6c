use crate::core::models::NetBalance;
use crate::core::settlement::round_cents;
use serde_json::{Value, json};
use tracing::debug;

const BASE_COLORS: [(u8, u8, u8); 5] = [
    (75, 192, 192),  // Teal
    (255, 99, 132),  // Red
    (54, 162, 235),  // Blue
    (255, 206, 86),  // Yellow
    (153, 102, 255), // Purple
];

/// Generates Chart.js configurations for the balance screen.
pub struct BalanceChart;

impl BalanceChart {
    /// Bar chart of each person's net position: positive bars are owed money,
    /// negative bars owe money.
    pub fn net_balance_chart(net_balances: &[NetBalance], title: &str) -> Value {
        debug!("Generating net balance chart for {} people", net_balances.len());

        let labels: Vec<&str> = net_balances.iter().map(|b| b.name.as_str()).collect();
        let data: Vec<f64> = net_balances.iter().map(|b| round_cents(b.net)).collect();

        // Colors cycle so any roster size gets one per bar
        let (background_colors, border_colors): (Vec<String>, Vec<String>) = (0..labels.len())
            .map(|i| {
                let (r, g, b) = BASE_COLORS[i % BASE_COLORS.len()];
                (
                    format!("rgba({}, {}, {}, 0.6)", r, g, b),
                    format!("rgba({}, {}, {}, 1)", r, g, b),
                )
            })
            .unzip();

        json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [{
                    "label": "Net balance",
                    "data": data,
                    "backgroundColor": background_colors,
                    "borderColor": border_colors,
                    "borderWidth": 1
                }]
            },
            "options": {
                "scales": {
                    "y": {
                        "title": {
                            "display": true,
                            "text": "Balance (Currency)"
                        }
                    },
                    "x": {
                        "title": {
                            "display": true,
                            "text": "People"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": title
                    }
                }
            }
        })
    }
}
