use crate::contract::model::User;

/// Records that expose free-text searchable fields.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.role.as_str(),
        ]
    }
}

/// True if `query` is a case-insensitive substring of any searchable field.
pub fn matches<R: Searchable>(record: &R, query: &str) -> bool {
    let needle = query.to_lowercase();
    matches_folded(record, &needle)
}

fn matches_folded<R: Searchable>(record: &R, needle: &str) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Visible subset of `records` for `query`, in input order. An empty query keeps everything.
pub fn visible<'a, R: Searchable>(records: &'a [R], query: &str) -> Vec<&'a R> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches_folded(*r, &needle))
        .collect()
}
