use crate::search::{SearchResponse, SearchResult};
use crate::ui::controller::{Phase, ResultsView, SearchController, Tab};
use colored::*;
use scraper::Html;
use std::borrow::Cow;

pub const TOP_RESULTS: usize = 3;
pub const SNIPPETS_PER_SOURCE: usize = 2;
pub const SNIPPET_MAX_CHARS: usize = 200;

/// Cuts a snippet to [`SNIPPET_MAX_CHARS`] characters, marking the cut with
/// `...`. Shorter snippets are returned untouched.
pub fn truncate_snippet(snippet: &str) -> Cow<'_, str> {
    match snippet.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => Cow::Owned(format!("{}...", &snippet[..cut])),
        None => Cow::Borrowed(snippet),
    }
}

/// Text content of a description that may carry HTML.
pub fn description_text(description: &str) -> String {
    let fragment = Html::parse_fragment(description);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render(controller: &SearchController) -> String {
    match controller.phase() {
        Phase::PreSearch { .. } => render_pre_search(),
        Phase::Searching { query, .. } => render_searching(query),
        Phase::Results { query, view } => render_results(query, view),
    }
}

fn render_pre_search() -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Perplexity Search".bold()));
    out.push_str("Ask any question and get AI-powered search results.\n\n");
    out.push_str(&format!(
        "{}\n",
        "Example questions: \"What are the most visited places in Japan?\", \"How does a quantum computer work?\""
            .dimmed()
    ));
    out.push_str("Type a question and press enter (:quit to exit).\n");
    out
}

fn render_searching(query: &str) -> String {
    format!(
        "{}\n{}\n{}\n",
        format!("Searching: \"{}\"", query).bold(),
        "This may take up to 30 seconds.".dimmed(),
        ":new  New Search".cyan()
    )
}

fn render_results(query: &str, view: &ResultsView) -> String {
    let mut out = format!("{}\n", format!("\"{}\"", query).bold());
    match view {
        ResultsView::Failed { message, retry } => {
            out.push_str(&format!("{} {}\n", "Error:".red().bold(), message));
            let control = if retry.is_some() {
                "Retrying..."
            } else {
                ":retry  Retry Request"
            };
            out.push_str(&format!("{}\n", control.yellow()));
        }
        ResultsView::Loaded { response, tab } => {
            out.push_str(&render_tab_bar(response, *tab));
            out.push('\n');
            out.push_str(&render_tab(response, *tab));
        }
    }
    out.push_str(&format!("{}\n", ":new  New Search".cyan()));
    out
}

pub fn render_tab_bar(response: &SearchResponse, active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            let label = match tab {
                Tab::Search => "Search".to_string(),
                Tab::Images => format!("Images ({})", response.image_urls.len()),
                Tab::Sources => format!("Sources ({})", response.results.len()),
            };
            if *tab == active {
                format!("[{}]", label).bold().to_string()
            } else {
                format!(" {} ", label)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        + "\n"
}

pub fn render_tab(response: &SearchResponse, tab: Tab) -> String {
    match tab {
        Tab::Search => render_search_tab(response),
        Tab::Images => render_images_tab(response),
        Tab::Sources => render_sources_tab(response),
    }
}

fn render_source_header(out: &mut String, index: usize, result: &SearchResult) {
    out.push_str(&format!("{}. {}\n", index + 1, result.title.bold()));
    out.push_str(&format!("   {}\n", result.url.blue().underline()));
    if let Some(favicon) = &result.favicon {
        out.push_str(&format!("   favicon: {}\n", favicon.dimmed()));
    }
    if !result.site_long_name.is_empty() {
        out.push_str(&format!("   {}\n", result.site_long_name.dimmed()));
    }
    let description = description_text(&result.description);
    if !description.is_empty() {
        out.push_str(&format!("   {}\n", description));
    }
}

pub fn render_search_tab(response: &SearchResponse) -> String {
    let mut out = format!("{}\n{}\n\n", "AI Overview".blue().bold(), response.ai_overview);
    out.push_str(&format!("{}\n", "Top Results".bold()));
    for (i, result) in response.results.iter().take(TOP_RESULTS).enumerate() {
        render_source_header(&mut out, i, result);
    }
    out
}

pub fn render_images_tab(response: &SearchResponse) -> String {
    let mut out = format!(
        "{}\n",
        format!("Images related to \"{}\"", response.query).bold()
    );
    for (i, url) in response.image_urls.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, url));
    }
    out
}

pub fn render_sources_tab(response: &SearchResponse) -> String {
    let mut out = format!(
        "{}\n",
        format!("Sources for \"{}\"", response.query).bold()
    );
    for (i, result) in response.results.iter().enumerate() {
        render_source_header(&mut out, i, result);
        if let Some(thumbnail) = &result.thumbnail {
            out.push_str(&format!("   thumbnail: {}\n", thumbnail.dimmed()));
        }
        if !result.snippets.is_empty() {
            out.push_str(&format!("   {}\n", "Excerpts from this source:".dimmed()));
            for snippet in result.snippets.iter().take(SNIPPETS_PER_SOURCE) {
                out.push_str(&format!("   \"{}\"\n", truncate_snippet(snippet)));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn france() -> SearchResponse {
        serde_json::from_value(json!({
            "success": true,
            "query": "capital of France",
            "ai_overview": "Paris is the capital and largest city of France.",
            "is_safe": true,
            "image_urls": [
                "https://img.example.com/a.jpg",
                "https://img.example.com/b.jpg",
                "https://img.example.com/c.jpg",
                "https://img.example.com/d.jpg",
                "https://img.example.com/e.jpg"
            ],
            "results": [
                {
                    "title": "Paris - Wikipedia",
                    "url": "https://en.wikipedia.org/wiki/Paris",
                    "description": "<strong>Paris</strong> is the capital of France",
                    "site_long_name": "en.wikipedia.org",
                    "favicon": "https://en.wikipedia.org/favicon.ico",
                    "snippets": ["a".repeat(250), "short snippet", "third snippet"]
                },
                {
                    "title": "Paris travel guide",
                    "url": "https://travel.example.com/paris",
                    "description": "Plan a trip",
                    "snippets": []
                },
                {
                    "title": "France facts",
                    "url": "https://facts.example.com/france",
                    "description": "All about France",
                    "snippets": ["Capital: Paris"]
                },
                {
                    "title": "Fourth result",
                    "url": "https://fourth.example.com",
                    "description": "Never on the search tab"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn long_snippet_is_cut_at_200_chars() {
        let long = "x".repeat(201);
        let cut = truncate_snippet(&long);
        assert_eq!(cut.len(), 203);
        assert!(cut.ends_with("..."));
        assert_eq!(&cut[..200], &long[..200]);
    }

    #[test]
    fn snippet_at_limit_is_untouched() {
        let exact = "y".repeat(200);
        assert_eq!(truncate_snippet(&exact), exact.as_str());
        assert_eq!(truncate_snippet("short"), "short");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let accented = "é".repeat(201);
        let cut = truncate_snippet(&accented);
        assert_eq!(cut.chars().count(), 203);
        assert!(cut.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn description_markup_is_reduced_to_text() {
        assert_eq!(
            description_text("<strong>Paris</strong> is the <em>capital</em>"),
            "Paris is the capital"
        );
        assert_eq!(description_text("plain"), "plain");
    }

    #[test]
    fn search_tab_shows_overview_and_top_three() {
        let out = render_search_tab(&france());
        assert!(out.contains("Paris is the capital and largest city of France."));
        assert!(out.contains("Paris - Wikipedia"));
        assert!(out.contains("France facts"));
        assert!(!out.contains("Fourth result"));
        assert!(!out.contains("<strong>"));
    }

    #[test]
    fn images_tab_lists_every_url_in_order() {
        let response = france();
        let out = render_images_tab(&response);
        let positions: Vec<_> = response
            .image_urls
            .iter()
            .map(|url| out.find(url.as_str()).unwrap())
            .collect();
        assert_eq!(positions.len(), 5);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn sources_tab_caps_snippets_per_source() {
        let out = render_sources_tab(&france());
        assert!(out.contains("Fourth result"));
        assert!(out.contains(&format!("\"{}...\"", "a".repeat(200))));
        assert!(out.contains("\"short snippet\""));
        assert!(!out.contains("third snippet"));
        assert!(out.contains("\"Capital: Paris\""));
    }

    #[test]
    fn favicon_is_shown_on_search_and_sources_tabs() {
        let response = france();
        for out in [render_search_tab(&response), render_sources_tab(&response)] {
            assert!(out.contains("https://en.wikipedia.org/favicon.ico"));
            assert_eq!(out.matches("favicon:").count(), 1);
        }
    }

    #[test]
    fn tab_bar_counts_images_and_sources() {
        let out = render_tab_bar(&france(), Tab::Images);
        assert!(out.contains("Images (5)"));
        assert!(out.contains("Sources (4)"));
    }
}
