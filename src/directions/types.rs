use serde::Serialize;

/// The pair of locations sent to the directions service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
}

impl RouteQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}
