use super::{RenderedReport, ReportInput, ReportRenderer, format_money};
use crate::core::classifier::{Classifier, KeywordClassifier};
use crate::core::errors::SplitshotError;
use crate::core::models::Category;
use crate::core::settlement::total_amount;
use std::borrow::Cow;
use std::fmt::Write;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 30px; color: #333; line-height: 1.6; }
h1 { color: #4CAF50; border-bottom: 3px solid #4CAF50; padding-bottom: 10px; }
h2 { color: #666; margin-top: 30px; }
.header-info { background: #f5f5f5; padding: 15px; border-radius: 5px; }
.total-box { background: #4CAF50; color: white; padding: 20px; border-radius: 8px; text-align: center; }
.total-amount { font-size: 36px; font-weight: bold; }
table { width: 100%; border-collapse: collapse; margin: 20px 0; }
th { background-color: #4CAF50; color: white; padding: 12px; text-align: left; }
td { border-bottom: 1px solid #ddd; padding: 10px; }
.amount { font-weight: bold; color: #4CAF50; }
.balance-item { background: #fff3cd; border-left: 4px solid #ffc107; padding: 12px; margin: 10px 0; }
.settled { text-align: center; padding: 30px; background: #e8f5e9; border-radius: 8px; }
.footer { margin-top: 40px; text-align: center; color: #999; font-size: 12px; }
";

/// Renders the shared-expense report as a standalone HTML document, ready to
/// be printed to PDF by whatever sharing layer sits on top.
pub struct HtmlReportRenderer<C: Classifier = KeywordClassifier> {
    title: String,
    classifier: C,
}

impl HtmlReportRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        HtmlReportRenderer::with_classifier(title, KeywordClassifier::default())
    }
}

impl<C: Classifier> HtmlReportRenderer<C> {
    pub fn with_classifier(title: impl Into<String>, classifier: C) -> Self {
        HtmlReportRenderer {
            title: title.into(),
            classifier,
        }
    }

    fn write_document(&self, out: &mut String, input: &ReportInput<'_>) -> std::fmt::Result {
        let title = escape_html(&self.title);
        let report_date = input.generated_at.format("%Y-%m-%d");

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", title)?;
        writeln!(out, "<style>\n{}</style>", STYLE)?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<h1>{}</h1>", title)?;

        writeln!(out, "<div class=\"header-info\">")?;
        writeln!(out, "<p><strong>Report date:</strong> {}</p>", report_date)?;
        writeln!(out, "<p><strong>Expenses recorded:</strong> {}</p>", input.expenses.len())?;
        writeln!(out, "</div>")?;

        writeln!(out, "<div class=\"total-box\">")?;
        writeln!(out, "<div>TOTAL SPENT</div>")?;
        writeln!(
            out,
            "<div class=\"total-amount\">{}</div>",
            format_money(total_amount(input.expenses))
        )?;
        writeln!(out, "</div>")?;

        self.write_totals(out, input)?;
        self.write_expenses(out, input)?;
        self.write_categories(out, input)?;
        self.write_balances(out, input)?;

        writeln!(out, "<div class=\"footer\">")?;
        writeln!(out, "<p>Generated automatically on {}</p>", report_date)?;
        writeln!(out, "</div>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }

    fn write_totals(&self, out: &mut String, input: &ReportInput<'_>) -> std::fmt::Result {
        writeln!(out, "<h2>Total paid per person</h2>")?;
        writeln!(out, "<table>")?;
        writeln!(out, "<tr><th>Person</th><th>Total paid</th></tr>")?;
        for (name, total) in input.totals_by_person.iter() {
            writeln!(
                out,
                "<tr><td>{}</td><td class=\"amount\">{}</td></tr>",
                escape_html(name),
                format_money(total)
            )?;
        }
        writeln!(out, "</table>")
    }

    fn write_expenses(&self, out: &mut String, input: &ReportInput<'_>) -> std::fmt::Result {
        writeln!(out, "<h2>Expense detail</h2>")?;
        writeln!(out, "<table>")?;
        writeln!(
            out,
            "<tr><th>Description</th><th>Paid by</th><th>Amount</th><th>Date</th><th>Category</th></tr>"
        )?;
        for expense in input.expenses {
            writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td class=\"amount\">{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&expense.description),
                escape_html(&expense.paid_by_name),
                format_money(expense.amount),
                expense.date.format("%Y-%m-%d"),
                self.classifier.classify(&expense.description)
            )?;
        }
        writeln!(out, "</table>")
    }

    fn write_categories(&self, out: &mut String, input: &ReportInput<'_>) -> std::fmt::Result {
        let mut per_category = [0.0_f64; Category::ALL.len()];
        for expense in input.expenses {
            let category = self.classifier.classify(&expense.description);
            if let Some(slot) = Category::ALL.iter().position(|c| *c == category) {
                per_category[slot] += expense.amount;
            }
        }

        writeln!(out, "<h2>Spending by category</h2>")?;
        writeln!(out, "<table>")?;
        writeln!(out, "<tr><th>Category</th><th>Total</th></tr>")?;
        for (category, total) in Category::ALL.iter().zip(per_category) {
            if total > 0.0 {
                writeln!(
                    out,
                    "<tr><td>{}</td><td class=\"amount\">{}</td></tr>",
                    category,
                    format_money(total)
                )?;
            }
        }
        writeln!(out, "</table>")
    }

    fn write_balances(&self, out: &mut String, input: &ReportInput<'_>) -> std::fmt::Result {
        writeln!(out, "<h2>Balances: who owes whom</h2>")?;
        if input.balances.is_empty() {
            writeln!(out, "<div class=\"settled\">")?;
            writeln!(out, "<p><strong>Everything is settled!</strong></p>")?;
            writeln!(out, "<p>Everyone has paid their fair share.</p>")?;
            return writeln!(out, "</div>");
        }

        for balance in input.balances {
            writeln!(
                out,
                "<div class=\"balance-item\"><strong>{}</strong> owes <strong>{}</strong>: <span class=\"amount\">{}</span></div>",
                escape_html(&balance.from),
                escape_html(&balance.to),
                format_money(balance.amount)
            )?;
        }
        Ok(())
    }
}

impl<C: Classifier> ReportRenderer for HtmlReportRenderer<C> {
    fn render(&self, input: &ReportInput<'_>) -> Result<RenderedReport, SplitshotError> {
        let mut body = String::with_capacity(4096 + input.expenses.len() * 160);
        self.write_document(&mut body, input)
            .map_err(|e| SplitshotError::ReportError(format!("Failed to render HTML report: {}", e)))?;

        Ok(RenderedReport {
            content_type: "text/html; charset=utf-8",
            body,
        })
    }
}

fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}
