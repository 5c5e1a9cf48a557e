//! Standalone HTML page for a data dictionary.

use crate::dictionary::{ColumnEntry, DataDictionary};
use crate::profile::with_thousands;

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
.header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; margin-bottom: 30px; }
.header h1 { margin: 0; }
.section { background: white; padding: 25px; margin-bottom: 20px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.section h2 { color: #667eea; border-bottom: 3px solid #667eea; padding-bottom: 10px; margin-top: 0; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 16px; }
.metric { background: #f8f9fa; padding: 15px; border-radius: 5px; border-left: 4px solid #667eea; }
.metric-label { font-size: 0.9em; color: #666; }
.metric-value { font-size: 1.4em; font-weight: bold; }
.column { border: 1px solid #e0e0e0; border-radius: 8px; padding: 16px; margin-bottom: 16px; }
.column-type { font-family: monospace; background: #eef; padding: 2px 8px; border-radius: 4px; float: right; }
.badge { display: inline-block; padding: 2px 8px; border-radius: 10px; font-size: 0.8em; margin-right: 5px; background: #e3f2fd; }
.badge.pii { background: #ffebee; color: #c62828; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 8px; border-bottom: 1px solid #eee; }
"#;

fn metric(label: &str, value: &str) -> String {
    format!(
        "<div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div></div>\n",
        escape_html(label),
        escape_html(value)
    )
}

/// Render a dictionary as a self-contained HTML page.
pub fn render_html(dict: &DataDictionary) -> String {
    let overview = &dict.overview;
    let quality = &dict.data_quality;
    let name = escape_html(&dict.dataset_name);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>Data Dictionary - {}</title>\n", name));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    html.push_str(&format!(
        "<div class=\"header\"><h1>Data Dictionary</h1><p>{}</p><p>Generated: {}</p></div>\n",
        name,
        dict.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    html.push_str("<div class=\"section\"><h2>Overview</h2>\n");
    html.push_str(&format!("<p>{}</p>\n<div class=\"grid\">\n", escape_html(&overview.description)));
    html.push_str(&metric("Records", &with_thousands(overview.record_count)));
    html.push_str(&metric("Fields", &overview.field_count.to_string()));
    html.push_str(&metric("Size", &overview.size_mb));
    html.push_str(&metric("Refresh Frequency", &overview.refresh_frequency));
    html.push_str("</div></div>\n");

    html.push_str("<div class=\"section\"><h2>Data Quality</h2>\n<div class=\"grid\">\n");
    html.push_str(&metric("Completeness", &format!("{:.2}%", quality.overall_completeness)));
    html.push_str(&metric("Quality Score", &quality.quality_score.to_string()));
    html.push_str(&metric("Duplicate Records", &quality.duplicate_records.to_string()));
    html.push_str(&metric("Issues", &quality.quality_issues.len().to_string()));
    html.push_str("</div>\n");
    if !quality.quality_issues.is_empty() {
        html.push_str("<table><tr><th>Column</th><th>Issue</th><th>Severity</th><th>Detail</th></tr>\n");
        for issue in &quality.quality_issues {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&issue.column),
                issue.issue.label(),
                issue.severity.as_str(),
                escape_html(issue.detail.as_deref().unwrap_or(""))
            ));
        }
        html.push_str("</table>\n");
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\"><h2>Column Definitions</h2>\n");
    for column in &dict.columns {
        render_column(&mut html, column);
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"section\"><h2>Usage Notes</h2>\n<ul>\n");
    for note in &dict.usage_notes.notes {
        html.push_str(&format!("<li>{}</li>\n", escape_html(note)));
    }
    html.push_str("</ul></div>\n</body>\n</html>\n");
    html
}

fn render_column(html: &mut String, column: &ColumnEntry) {
    let profile = &column.profile;
    let description = if column.description.is_empty() {
        "No description available"
    } else {
        column.description.as_str()
    };

    html.push_str("<div class=\"column\">\n");
    html.push_str(&format!(
        "<span class=\"column-type\">{}</span><strong>{}</strong> <code>{}</code>\n",
        escape_html(&column.data_type.sql),
        escape_html(&column.business_name),
        escape_html(&column.technical_name)
    ));
    html.push_str(&format!("<p>{}</p>\n<div>", escape_html(description)));
    if column.is_unique {
        html.push_str("<span class=\"badge\">Unique</span>");
    }
    if column.nullable {
        html.push_str("<span class=\"badge\">Nullable</span>");
    }
    if column.is_pii {
        html.push_str("<span class=\"badge pii\">PII</span>");
    }
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<p>Null rate: {:.2}% &middot; Unique values: {}",
        profile.null_percentage,
        with_thousands(profile.unique_count)
    ));
    if let Some(owner) = &column.owner {
        html.push_str(&format!(" &middot; Owner: {}", escape_html(owner)));
    }
    html.push_str("</p>\n");

    if !profile.sample_values.is_empty() {
        let samples: Vec<String> = profile.sample_values.iter().map(|s| escape_html(s)).collect();
        html.push_str(&format!("<p><strong>Sample Values:</strong> {}</p>\n", samples.join(", ")));
    }
    html.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
