/// Optional filters for the course listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub search: Option<String>,
}

impl CourseQuery {
    pub(crate) fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("category", self.category.as_deref()),
            ("level", self.level.as_deref()),
            ("search", self.search.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}
