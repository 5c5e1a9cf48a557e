//! Markdown rendering of a data dictionary.

use crate::dictionary::{ColumnEntry, DataDictionary};
use crate::profile::with_thousands;

/// Escape characters that would break a Markdown table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Render a dictionary as a Markdown document.
pub fn render_markdown(dict: &DataDictionary) -> String {
    let mut md = String::new();
    let overview = &dict.overview;
    let quality = &dict.data_quality;

    md.push_str(&format!("# Data Dictionary: {}\n\n", dict.dataset_name));
    md.push_str(&format!(
        "*Generated: {}*\n\n",
        dict.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Overview\n\n");
    md.push_str(&format!("{}\n\n", overview.description));
    md.push_str(&format!("- **Records**: {}\n", with_thousands(overview.record_count)));
    md.push_str(&format!("- **Fields**: {}\n", overview.field_count));
    md.push_str(&format!("- **Size**: {}\n", overview.size_mb));
    md.push_str(&format!("- **Refresh Frequency**: {}\n\n", overview.refresh_frequency));

    md.push_str("## Data Quality\n\n");
    md.push_str(&format!("- **Completeness**: {:.2}%\n", quality.overall_completeness));
    md.push_str(&format!("- **Quality Score**: {}\n", quality.quality_score));
    md.push_str(&format!("- **Duplicate Records**: {}\n\n", quality.duplicate_records));

    if !quality.quality_issues.is_empty() {
        md.push_str("| Column | Issue | Severity | Detail |\n");
        md.push_str("|--------|-------|----------|--------|\n");
        for issue in &quality.quality_issues {
            md.push_str(&format!(
                "| `{}` | {} | {} | {} |\n",
                cell(&issue.column),
                issue.issue.label(),
                issue.severity.as_str(),
                cell(issue.detail.as_deref().unwrap_or("")),
            ));
        }
        md.push('\n');
    }

    md.push_str("## Column Definitions\n\n");
    for column in &dict.columns {
        render_column(&mut md, column);
    }

    md.push_str("## Usage Notes\n\n");
    if !dict.usage_notes.primary_keys.is_empty() {
        let keys: Vec<String> = dict.usage_notes.primary_keys.iter().map(|k| format!("`{}`", k)).collect();
        md.push_str(&format!("**Candidate Keys:** {}\n\n", keys.join(", ")));
    }
    for note in &dict.usage_notes.notes {
        md.push_str(&format!("- {}\n", note));
    }

    md
}

fn render_column(md: &mut String, column: &ColumnEntry) {
    let profile = &column.profile;

    md.push_str(&format!("### {} (`{}`)\n\n", column.business_name, column.technical_name));
    md.push_str(&format!("{}\n\n", column.description));
    md.push_str(&format!("- **Data Type**: {}\n", column.data_type.sql));
    md.push_str(&format!("- **Nullable**: {}\n", column.nullable));
    md.push_str(&format!("- **Null Rate**: {:.2}%\n", profile.null_percentage));
    md.push_str(&format!("- **Unique Values**: {}\n", with_thousands(profile.unique_count)));

    if let Some(owner) = &column.owner {
        md.push_str(&format!("- **Owner**: {}\n", owner));
    }
    if column.is_pii {
        md.push_str("- **Contains PII**\n");
    }
    if !profile.sample_values.is_empty() {
        md.push_str(&format!("- **Sample Values**: {}\n", profile.sample_values.join(", ")));
    }
    md.push('\n');
}
