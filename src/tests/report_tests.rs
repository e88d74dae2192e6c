use crate::core::classifier::{Classifier, KeywordClassifier};
use crate::core::models::{Balance, Category, Expense};
use crate::core::settlement::{compute_balances, compute_net_balances, compute_totals_by_person};
use crate::infrastructure::report::chart::BalanceChart;
use crate::infrastructure::report::html::HtmlReportRenderer;
use crate::infrastructure::report::{ReportInput, ReportRenderer};
use crate::tests::{expense, roster};
use chrono::{TimeZone, Utc};

fn described(id: &str, description: &str, amount: f64, paid_by: &str, paid_by_name: &str) -> Expense {
    Expense {
        description: description.to_string(),
        paid_by_name: paid_by_name.to_string(),
        ..expense(id, amount, paid_by, &["1", "2", "3"])
    }
}

fn render<C: Classifier>(renderer: &HtmlReportRenderer<C>, expenses: &[Expense]) -> String {
    let balances: Vec<Balance> = compute_balances(expenses, &roster()).unwrap();
    let totals = compute_totals_by_person(expenses, &roster()).unwrap();
    renderer
        .render(&ReportInput {
            expenses,
            balances: &balances,
            totals_by_person: &totals,
            generated_at: Utc.with_ymd_and_hms(2024, 6, 30, 18, 0, 0).unwrap(),
        })
        .unwrap()
        .body
}

#[test]
fn test_report_lists_totals_expenses_and_transfers() {
    let expenses = vec![
        described("e1", "Dinner", 90.0, "1", "Juan"),
        described("e2", "Taxi", 12.5, "2", "María"),
    ];

    let body = render(&HtmlReportRenderer::new("Trip"), &expenses);

    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("<strong>Report date:</strong> 2024-06-30"));
    assert!(body.contains("<strong>Expenses recorded:</strong> 2"));
    assert!(body.contains("<div class=\"total-amount\">$102.50</div>"));
    assert!(body.contains("<tr><td>Pedro</td><td class=\"amount\">$0.00</td></tr>"));
    assert!(body.contains("<td>Dinner</td><td>Juan</td><td class=\"amount\">$90.00</td><td>2024-06-01</td><td>Food</td>"));
    assert!(body.contains("<tr><td>Transport</td><td class=\"amount\">$12.50</td></tr>"));
    assert!(body.contains("owes <strong>Juan</strong>"));
    assert!(!body.contains("Everything is settled!"));
}

#[test]
fn test_report_announces_settled_group() {
    let body = render(&HtmlReportRenderer::new("Trip"), &[]);

    assert!(body.contains("Everything is settled!"));
    assert!(body.contains("<div class=\"total-amount\">$0.00</div>"));
}

#[test]
fn test_report_escapes_user_text() {
    let expenses = vec![described("e1", "<script>alert('x')</script> & co", 30.0, "1", "Juan")];

    let body = render(&HtmlReportRenderer::new("Tom & Jerry's <trip>"), &expenses);

    assert!(body.contains("<h1>Tom &amp; Jerry&#39;s &lt;trip&gt;</h1>"));
    assert!(body.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    assert!(!body.contains("<script>"));
}

#[test]
fn test_report_uses_pluggable_classifier() {
    let expenses = vec![described("e1", "Anything at all", 60.0, "1", "Juan")];

    let renderer = HtmlReportRenderer::with_classifier("Trip", |_: &str| Category::Lodging);
    let body = render(&renderer, &expenses);

    assert!(body.contains("<td>Lodging</td>"));
    assert!(body.contains("<tr><td>Lodging</td><td class=\"amount\">$60.00</td></tr>"));
}

#[test]
fn test_keyword_classifier_matches_whole_words() {
    let classifier = KeywordClassifier::default();

    assert_eq!(classifier.classify("Dinner at Luigi's"), Category::Food);
    assert_eq!(classifier.classify("Cena con amigos"), Category::Food);
    assert_eq!(classifier.classify("SUPERMERCADO Día"), Category::Groceries);
    assert_eq!(classifier.classify("Taxi to the airport"), Category::Transport);
    assert_eq!(classifier.classify("Airbnb 3 nights"), Category::Lodging);
    assert_eq!(classifier.classify("Cine"), Category::Entertainment);
    assert_eq!(classifier.classify("Business lunch"), Category::Food);
    assert_eq!(classifier.classify("Gastos varios"), Category::Other);
    assert_eq!(classifier.classify(""), Category::Other);
}

#[test]
fn test_keyword_classifier_first_rule_wins() {
    let classifier = KeywordClassifier::new()
        .with_rule(Category::Entertainment, ["pizza"])
        .with_rule(Category::Food, ["pizza", "pasta"]);

    assert_eq!(classifier.classify("Pizza and a movie"), Category::Entertainment);
    assert_eq!(classifier.classify("Pasta"), Category::Food);
}

#[test]
fn test_net_balance_chart() {
    let expenses = vec![expense("e1", 100.0, "1", &["1", "2", "3"])];
    let nets = compute_net_balances(&expenses, &roster()).unwrap();

    let chart = BalanceChart::net_balance_chart(&nets, "Net balances");

    assert_eq!(chart["type"], "bar");
    assert_eq!(chart["data"]["labels"], serde_json::json!(["Juan", "María", "Pedro"]));
    assert_eq!(
        chart["data"]["datasets"][0]["data"],
        serde_json::json!([66.67, -33.33, -33.33])
    );
    assert_eq!(
        chart["data"]["datasets"][0]["backgroundColor"].as_array().unwrap().len(),
        3
    );
    assert_eq!(chart["options"]["plugins"]["title"]["text"], "Net balances");
}
