use crate::models::Movie;

const POPULAR_LIMIT: usize = 6;
const RECENT_LIMIT: usize = 4;

/// Hero pick: the flagged movie, else the first with a trailer, else the first one
pub fn featured(movies: &[Movie]) -> Option<&Movie> {
    movies
        .iter()
        .find(|m| m.is_featured)
        .or_else(|| movies.iter().find(|m| m.has_trailer()))
        .or_else(|| movies.first())
}

/// Popular-flagged movies, or the head of the catalog when nothing is flagged
pub fn popular_now(movies: &[Movie]) -> Vec<&Movie> {
    let popular: Vec<&Movie> = movies
        .iter()
        .filter(|m| m.is_popular)
        .take(POPULAR_LIMIT)
        .collect();

    if popular.is_empty() {
        movies.iter().take(POPULAR_LIMIT).collect()
    } else {
        popular
    }
}

pub fn recent_releases(movies: &[Movie]) -> Vec<&Movie> {
    movies.iter().take(RECENT_LIMIT).collect()
}

/// Case-insensitive match on title, description or interpreter name
pub fn search<'a>(movies: &'a [Movie], term: &str) -> Vec<&'a Movie> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return movies.iter().collect();
    }

    let matches = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&term));

    movies
        .iter()
        .filter(|m| {
            matches(Some(m.title.as_str()))
                || matches(m.description.as_deref())
                || matches(m.interpreter_name.as_deref())
        })
        .collect()
}
