use std::fmt::Write;

use crate::{
    error::{AppError, AppResult},
    models::{FilterOptions, FilterSelection, PickOutcome, Recommendation},
    render::{text, NO_MATCHES},
};

const STYLE: &str = r#"
body { font-family: "Nunito", system-ui, sans-serif; background: #DFC1CB; color: #3B1020; margin: 0; }
main { max-width: 900px; margin: 0 auto; padding: 3rem 1rem; }
h1 { font-family: "Playfair Display", serif; font-size: 3rem; text-align: center; margin-bottom: 0.5rem; }
form.filters { display: flex; gap: 1rem; flex-wrap: wrap; justify-content: center; background: #C48197; padding: 1rem; border-radius: 18px; }
form.filters label { color: #FDF6F8; font-weight: 600; display: flex; flex-direction: column; gap: 0.3rem; }
form.filters select { min-width: 12rem; min-height: 6rem; }
form.filters button { align-self: flex-end; background: #B66681; color: #FDF6F8; border: none; border-radius: 999px; padding: 0.45rem 1.3rem; font-weight: 600; cursor: pointer; }
.notice { text-align: center; margin-top: 2rem; padding: 1rem; border-radius: 12px; }
.notice.warning { background: #FDF6F8; }
.notice.error { background: #F8D7DA; color: #721C24; white-space: pre-wrap; }
.watch-card { margin: 2rem auto 0; padding: 1.8rem 2rem; border-radius: 18px; background: #FDF6F8; max-width: 620px; border: 2px solid #C48197; box-shadow: 0 14px 35px rgba(0,0,0,0.18); display: flex; gap: 1.25rem; align-items: center; }
.watch-card-text { flex: 1; }
.watch-card-poster { flex: 0 0 35%; }
.watch-card-poster img { width: 100%; height: auto; border-radius: 12px; max-height: 320px; object-fit: contain; }
.watch-card a { color: #B66681; text-decoration: none; font-weight: 500; }
"#;

/// Escapes text for use in element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full page: filter form (or the schema error in its place) plus an optional pick result
pub fn page(
    options: &AppResult<FilterOptions>,
    selection: &FilterSelection,
    pick: Option<&AppResult<PickOutcome>>,
) -> String {
    let mut body = String::from("<h1>Watch Roulette</h1>\n");

    match options {
        Ok(options) => body.push_str(&filter_form(options, selection)),
        Err(err) => {
            body.push_str(&error_notice("Error talking to Notion while loading options", err));
            return document(&body);
        }
    }

    match pick {
        Some(Ok(PickOutcome::Found { recommendation })) => body.push_str(&card(recommendation)),
        Some(Ok(PickOutcome::NoMatch)) => {
            let _ = writeln!(body, "<p class=\"notice warning\">{}</p>", escape(NO_MATCHES));
        }
        Some(Err(err)) => {
            body.push_str(&error_notice("Error talking to Notion while picking", err))
        }
        None => {}
    }

    document(&body)
}

fn document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Watch Roulette</title>\n<style>{}</style>\n</head>\n\
         <body>\n<main>\n{}</main>\n</body>\n</html>\n",
        STYLE, body
    )
}

fn filter_form(options: &FilterOptions, selection: &FilterSelection) -> String {
    let mut form = String::from("<form class=\"filters\" method=\"get\" action=\"/pick\">\n");
    form.push_str(&multi_select("Languages", "language", &options.languages, &selection.languages));
    form.push_str(&multi_select("Types", "type", &options.types, &selection.types));
    form.push_str(&multi_select("Genres", "genre", &options.genres, &selection.genres));
    form.push_str("<button type=\"submit\">Pick something!</button>\n</form>\n");
    form
}

fn multi_select(label: &str, field: &str, options: &[String], chosen: &[String]) -> String {
    let mut html = format!(
        "<label>{}\n<select name=\"{}\" multiple>\n",
        escape(label),
        escape(field)
    );
    for option in options {
        let selected = if chosen.contains(option) { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(option),
            selected
        );
    }
    html.push_str("</select>\n</label>\n");
    html
}

fn card(rec: &Recommendation) -> String {
    let title = escape(&rec.title);
    let mut html = String::from(
        "<h3 style=\"text-align:center;margin-top:1.5rem;\">You should watch:</h3>\n\
         <div class=\"watch-card\">\n<div class=\"watch-card-text\">\n",
    );

    let _ = writeln!(html, "<h2>{}</h2>", title);
    let _ = writeln!(html, "<p><strong>Type:</strong> {}</p>", escape(&rec.content_type));
    let _ = writeln!(html, "<p><strong>Language:</strong> {}</p>", escape(&rec.language));
    let _ = writeln!(html, "<p><strong>Genres:</strong> {}</p>", escape(&rec.genres_display()));
    let _ = writeln!(
        html,
        "<p><strong>Release:</strong> {}</p>",
        escape(&rec.release.to_string())
    );

    if let Some(link) = &rec.link {
        let _ = writeln!(
            html,
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Watch here ↗</a></p>",
            escape(link)
        );
    }
    if let Some(page_url) = &rec.page_url {
        let _ = writeln!(
            html,
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Open in Notion ↗</a></p>",
            escape(page_url)
        );
    }
    html.push_str("</div>\n");

    if let Some(poster) = &rec.poster_url {
        let _ = writeln!(
            html,
            "<div class=\"watch-card-poster\"><img src=\"{}\" alt=\"Poster for {}\"></div>",
            escape(poster),
            title
        );
    }

    html.push_str("</div>\n");
    html
}

fn error_notice(context: &str, err: &AppError) -> String {
    format!(
        "<p class=\"notice error\">{}:\n\n{}</p>\n",
        escape(context),
        escape(&text::error(err))
    )
}
