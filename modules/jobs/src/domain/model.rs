/// A single job listing.
///
/// Built only by a fetcher and passed by value up to the router, which maps
/// it to its wire representation. No field is validated here; empty strings
/// are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Upstream-assigned id, unique within one response
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}
