//! Index page summarizing every dictionary in an output directory.

use super::html::{escape_html, STYLE};
use super::{dictionary_file, ExportFormat};
use crate::dictionary::DataDictionary;
use crate::profile::with_thousands;

/// Render the dashboard. Datasets are listed in the order given.
pub fn render_dashboard<'a>(dictionaries: impl IntoIterator<Item = &'a DataDictionary>) -> String {
    let mut rows = String::new();
    let mut count = 0;
    let mut total_records = 0;
    let mut total_pii = 0;

    for dict in dictionaries {
        let mapped = dict.columns.iter().filter(|c| c.term.is_mapped()).count();
        let pii = dict.pii_columns().count();
        count += 1;
        total_records += dict.overview.record_count;
        total_pii += pii;

        let link = dictionary_file(&dict.dataset_name, ExportFormat::Html);
        rows.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td><td>{:.2}%</td><td>{}</td><td>{}/{}</td><td>{}</td></tr>\n",
            escape_html(&link),
            escape_html(&dict.dataset_name),
            with_thousands(dict.overview.record_count),
            dict.overview.field_count,
            dict.data_quality.overall_completeness,
            dict.data_quality.quality_score,
            mapped,
            dict.columns.len(),
            pii,
        ));
    }

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<title>Data Dictionary Dashboard</title>\n");
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
    html.push_str("<div class=\"header\"><h1>Data Dictionary Dashboard</h1></div>\n");

    html.push_str("<div class=\"section\"><div class=\"grid\">\n");
    for (label, value) in [
        ("Datasets", count.to_string()),
        ("Total Records", with_thousands(total_records)),
        ("PII Columns", total_pii.to_string()),
    ] {
        html.push_str(&format!(
            "<div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div></div>\n",
            label, value
        ));
    }
    html.push_str("</div></div>\n");

    html.push_str("<div class=\"section\"><h2>Datasets</h2>\n");
    if count == 0 {
        html.push_str("<p>No datasets have been documented yet.</p>\n");
    } else {
        html.push_str(
            "<table><tr><th>Dataset</th><th>Records</th><th>Fields</th><th>Completeness</th>\
             <th>Quality</th><th>Mapped</th><th>PII</th></tr>\n",
        );
        html.push_str(&rows);
        html.push_str("</table>\n");
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}
