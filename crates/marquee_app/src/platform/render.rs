use marquee_core::{BrowserViewModel, FetchStatus};

/// Renders the snapshot as plain text lines.
pub(crate) fn render(view: &BrowserViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.session.results.len() + 4);

    if let Some(error) = view.error.as_deref() {
        lines.push(format!("! {error}  (:retry)"));
    }
    if let Some(hero) = &view.hero {
        lines.push(format!("* {} - {}", hero.title, hero.overview));
    }

    let term = &view.session.term;
    if term.is_empty() {
        lines.push(format!("== {} ==", view.header.label()));
    } else {
        lines.push(format!("== {} for {:?} ==", view.header.label(), term));
    }
    for (index, movie) in view.session.results.iter().enumerate() {
        lines.push(format!("{:>4}. {} [{}]", index + 1, movie.title, movie.id));
    }

    let footer = match &view.status {
        FetchStatus::LoadingInitial | FetchStatus::LoadingMore => "loading...".to_string(),
        _ if view.can_load_more => format!(
            "page {}/{} of {} results  (:more)",
            view.session.page, view.session.total_pages, view.session.total_results
        ),
        _ => format!("{} results", view.session.total_results),
    };
    lines.push(footer);
    lines
}
