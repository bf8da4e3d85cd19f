/// Errors raised by route registration and URL reversal
///
/// Dispatch never fails: a path that matches nothing is silently ignored.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The compiled matcher was rejected by the regex engine
    #[error("invalid route template {template:?}: {source}")]
    InvalidPattern {
        template: String,
        #[source]
        source: regex::Error,
    },

    /// No registered route carries this name
    #[error("route not found: {0:?}")]
    RouteNotFound(String),

    /// Strict reversal was asked for a route without one of its placeholder values
    #[error("route {route:?} requires parameter {param:?}")]
    MissingParam { route: String, param: String },
}
