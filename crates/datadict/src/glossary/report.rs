//! Human-readable glossary report.

use super::term::{DatasetGlossary, MatchType};

impl DatasetGlossary {
    /// Render the mapping as a plain-text report.
    pub fn report(&self) -> String {
        let rule = "=".repeat(80);
        let thin = "-".repeat(80);
        let mut out = String::new();

        out.push_str(&format!("\nBusiness Glossary Report: {}\n", self.dataset_name));
        out.push_str(&format!("{}\n", rule));
        out.push_str(&format!("\nTotal Columns: {}\n", self.total_columns));
        out.push_str(&format!("Mapped: {}\n", self.mapped_columns));
        out.push_str(&format!("Unmapped: {}\n", self.unmapped_columns));
        out.push_str(&format!("\n{}\n", rule));
        out.push_str("\nColumn Definitions:\n");
        out.push_str(&thin);

        for (column, term) in &self.terms {
            out.push_str(&format!("\n\n{} ({})", term.business_name, column));
            out.push_str(&format!("\n  Definition: {}", term.definition));

            if let Some(data_type) = term.data_type.as_deref().filter(|t| !t.is_empty()) {
                out.push_str(&format!("\n  Data Type: {}", data_type));
            }
            if let Some(owner) = &term.owner {
                out.push_str(&format!("\n  Owner: {}", owner));
            }
            if !term.examples.is_empty() {
                let examples: Vec<&str> = term.examples.iter().take(3).map(String::as_str).collect();
                out.push_str(&format!("\n  Examples: {}", examples.join(", ")));
            }
            if term.is_pii {
                out.push_str("\n  Contains PII");
            }
            if term.match_type == MatchType::Fuzzy {
                out.push_str(&format!(
                    "\n  (Fuzzy match: {:.2} -> {})",
                    term.fuzzy_score.unwrap_or(0.0),
                    term.matched_term.as_deref().unwrap_or("?")
                ));
            }
            out.push_str(&format!("\n{}", thin));
        }

        out.push('\n');
        out
    }
}
