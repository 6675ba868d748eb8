//! Terminal rendering of pipeline state changes.

use std::io::Write;

use cinesearch_core::movie::MovieSummary;
use cinesearch_pipeline::{PipelineState, SearchStatus};
use tokio::sync::watch;

/// Lines to print for the transition from `prev` to `next`.
///
/// Only the parts that changed are rendered: the trending shortlist, the
/// loading indicator, the error message, and the resolved movie list.
pub fn render_changes(prev: &PipelineState, next: &PipelineState) -> Vec<String> {
    let mut lines = Vec::new();

    if next.trending != prev.trending && !next.trending.is_empty() {
        lines.push("Trending Movies".to_string());
        for entry in &next.trending {
            lines.push(format!("  {}. {} ({} searches)", entry.rank, entry.title, entry.count));
        }
    }

    let resolved = next.generation != prev.generation || next.status != prev.status;
    if !resolved {
        return lines;
    }

    match next.status {
        SearchStatus::Idle => {}
        SearchStatus::Loading => lines.push("Loading...".to_string()),
        SearchStatus::Error => {
            if let Some(message) = &next.error_message {
                lines.push(message.clone());
            }
        }
        SearchStatus::Success => {
            if next.debounced_term.is_empty() {
                lines.push("All Movies".to_string());
            } else {
                lines.push(format!("Results for \"{}\"", next.debounced_term));
            }
            if next.movies.is_empty() {
                lines.push("  No movies found.".to_string());
            }
            for movie in &next.movies {
                lines.push(format!("  {}", movie_line(movie)));
            }
        }
    }

    lines
}

fn movie_line(movie: &MovieSummary) -> String {
    let mut line = movie.title.clone();
    if let Some(year) = movie.release_year() {
        line.push_str(&format!(" ({year})"));
    }
    if let Some(rating) = movie.vote_average {
        line.push_str(&format!(" ★ {rating:.1}"));
    }
    if let Some(language) = movie.original_language.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(&format!(" [{language}]"));
    }
    line
}

/// Print state changes until the pipeline state channel closes.
pub async fn run(mut rx: watch::Receiver<PipelineState>) {
    let mut prev = rx.borrow_and_update().clone();
    while rx.changed().await.is_ok() {
        let next = rx.borrow_and_update().clone();
        let lines = render_changes(&prev, &next);
        if !lines.is_empty() {
            let mut stdout = std::io::stdout().lock();
            for line in lines {
                if writeln!(stdout, "{line}").is_err() {
                    return;
                }
            }
        }
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use cinesearch_core::search_count::TrendingEntry;

    use super::*;

    fn movie(id: i64, title: &str, date: Option<&str>) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: None,
            popularity: 0.0,
            release_date: date.map(str::to_string),
            vote_average: Some(7.5),
            original_language: None,
        }
    }

    #[test]
    fn loading_is_announced_once() {
        let prev = PipelineState::default();
        let next = PipelineState {
            status: SearchStatus::Loading,
            generation: 1,
            ..Default::default()
        };

        assert_eq!(render_changes(&prev, &next), vec!["Loading..."]);
        assert!(render_changes(&next, &next).is_empty());
    }

    #[test]
    fn success_lists_movies_under_term() {
        let prev = PipelineState {
            status: SearchStatus::Loading,
            generation: 2,
            debounced_term: "heat".into(),
            ..Default::default()
        };
        let next = PipelineState {
            status: SearchStatus::Success,
            movies: vec![movie(949, "Heat", Some("1995-12-15")), movie(1, "Heat 2", None)],
            ..prev.clone()
        };

        assert_eq!(
            render_changes(&prev, &next),
            vec![
                "Results for \"heat\"",
                "  Heat (1995) ★ 7.5",
                "  Heat 2 ★ 7.5",
            ]
        );
    }

    #[test]
    fn movie_line_shows_original_language() {
        let mut heat = movie(949, "Heat", Some("1995-12-15"));
        heat.original_language = Some("en".into());
        assert_eq!(movie_line(&heat), "Heat (1995) ★ 7.5 [en]");

        heat.original_language = Some(String::new());
        assert_eq!(movie_line(&heat), "Heat (1995) ★ 7.5");
    }

    #[test]
    fn empty_success_says_so() {
        let prev = PipelineState {
            status: SearchStatus::Loading,
            generation: 1,
            ..Default::default()
        };
        let next = PipelineState {
            status: SearchStatus::Success,
            ..prev.clone()
        };

        assert_eq!(render_changes(&prev, &next), vec!["All Movies", "  No movies found."]);
    }

    #[test]
    fn error_prints_message() {
        let prev = PipelineState {
            status: SearchStatus::Loading,
            generation: 3,
            ..Default::default()
        };
        let next = PipelineState {
            status: SearchStatus::Error,
            error_message: Some("Failed to fetch movies. Please try again later.".into()),
            ..prev.clone()
        };

        assert_eq!(
            render_changes(&prev, &next),
            vec!["Failed to fetch movies. Please try again later."]
        );
    }

    #[test]
    fn trending_rendered_when_it_changes() {
        let prev = PipelineState::default();
        let next = PipelineState {
            trending: vec![TrendingEntry {
                rank: 1,
                term: "batman".into(),
                movie_id: 268,
                title: "Batman".into(),
                poster_url: "/no-movie.png".into(),
                count: 2,
            }],
            ..Default::default()
        };

        assert_eq!(
            render_changes(&prev, &next),
            vec!["Trending Movies", "  1. Batman (2 searches)"]
        );
    }

    #[test]
    fn raw_edits_render_nothing() {
        let prev = PipelineState::default();
        let next = PipelineState {
            search_term: "ba".into(),
            ..Default::default()
        };

        assert!(render_changes(&prev, &next).is_empty());
    }
}
