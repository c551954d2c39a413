use crate::{
    error::AppError,
    models::{PickOutcome, Recommendation},
    render::NO_MATCHES,
};

/// Labeled plain-text lines for a recommendation
pub fn recommendation(rec: &Recommendation) -> String {
    let mut lines = vec![
        "You should watch:".to_string(),
        String::new(),
        format!("- Title: {}", rec.title),
        format!("- Type: {}", rec.content_type),
        format!("- Language: {}", rec.language),
        format!("- Genres: {}", rec.genres_display()),
        format!("- Release date: {}", rec.release),
    ];

    if let Some(link) = &rec.link {
        lines.push(format!("- Link: {}", link));
    }
    if let Some(page_url) = &rec.page_url {
        lines.push(format!("- Notion link: {}", page_url));
    }

    lines.join("\n")
}

pub fn outcome(outcome: &PickOutcome) -> String {
    match outcome {
        PickOutcome::Found { recommendation: rec } => recommendation(rec),
        PickOutcome::NoMatch => NO_MATCHES.to_string(),
    }
}

/// Remote failures are reported verbatim: status line, then the message
pub fn error(err: &AppError) -> String {
    match err {
        AppError::RemoteSchema { status, message } | AppError::RemoteQuery { status, message } => {
            match status {
                Some(status) => format!("Error from Notion:\n{} {}", status, message),
                None => format!("Error from Notion:\n{}", message),
            }
        }
        other => format!("Error: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Release;

    fn sample() -> Recommendation {
        Recommendation {
            title: "Signal".to_string(),
            content_type: "TV Show".to_string(),
            language: "Korean, English".to_string(),
            genres: vec!["Thriller".to_string(), "Drama".to_string()],
            release: Release::Date("2016-01-22".to_string()),
            page_url: Some("https://www.notion.so/abc".to_string()),
            poster_url: None,
            link: None,
        }
    }

    #[test]
    fn test_recommendation_lines() {
        let output = recommendation(&sample());
        assert_eq!(
            output,
            "You should watch:\n\n\
             - Title: Signal\n\
             - Type: TV Show\n\
             - Language: Korean, English\n\
             - Genres: Thriller, Drama\n\
             - Release date: 2016-01-22\n\
             - Notion link: https://www.notion.so/abc"
        );
    }

    #[test]
    fn test_empty_genres_and_unknown_release() {
        let rec = Recommendation {
            genres: vec![],
            release: Release::Unknown,
            page_url: None,
            ..sample()
        };
        let output = recommendation(&rec);
        assert!(output.contains("- Genres: —"));
        assert!(output.contains("- Release date: Unknown"));
        assert!(!output.contains("Notion link"));
    }

    #[test]
    fn test_no_match_outcome() {
        assert_eq!(outcome(&PickOutcome::NoMatch), NO_MATCHES);
    }

    #[test]
    fn test_error_carries_status_and_body() {
        let err = AppError::RemoteQuery {
            status: Some(401),
            message: r#"{"code":"unauthorized"}"#.to_string(),
        };
        assert_eq!(error(&err), "Error from Notion:\n401 {\"code\":\"unauthorized\"}");
    }
}
