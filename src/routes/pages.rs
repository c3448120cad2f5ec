//! Server-rendered HTML for the upload form and the summary table.

use crate::models::{format_total, Summary};

const TITLE: &str = "Excel Data Extractor for Kasir, Selisih, and Struk";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:48rem}\
table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:.3rem .6rem}\
td.num{text-align:right}.error{color:#b00020}";

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{style}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = TITLE,
        style = STYLE,
        body = body
    )
}

fn upload_form() -> &'static str {
    "<form method=\"post\" action=\"/summary\" enctype=\"multipart/form-data\">\n\
     <label>Upload an Excel file <input type=\"file\" name=\"file\" accept=\".xlsx\" required></label>\n\
     <button type=\"submit\">Process</button>\n</form>\n"
}

pub fn upload_page() -> String {
    layout(upload_form())
}

/// The summary table plus a download button that posts the CSV back to the
/// server, so no upload state is kept between requests.
pub fn summary_page(summary: &Summary, csv: &str) -> String {
    let mut body = String::from("<p>Summary of Struk Sum and Negative Selisih Count:</p>\n");

    body.push_str("<table>\n<thead><tr><th></th><th>KASIR</th><th>total_struk</th><th>negative_selisih_count</th></tr></thead>\n<tbody>\n");
    for (idx, row) in summary.rows.iter().enumerate() {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>\n",
            idx,
            escape(&row.kasir),
            format_total(row.total_struk),
            row.negative_selisih_count
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    if summary.is_empty() {
        body.push_str("<p>No rows with KASIR, SELISIH and STRUK were found.</p>\n");
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"/summary/download\">\n\
         <input type=\"hidden\" name=\"csv\" value=\"{}\">\n\
         <button type=\"submit\">Download CSV</button>\n</form>\n",
        escape(csv)
    ));
    body.push_str(upload_form());

    layout(&body)
}

pub fn error_page(message: &str) -> String {
    layout(&format!(
        "<p class=\"error\">{}</p>\n{}",
        escape(message),
        upload_form()
    ))
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("&#10;"),
            // a raw CR in an attribute would be folded into LF by the parser
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}
