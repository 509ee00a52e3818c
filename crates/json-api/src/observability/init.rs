//! Observability lifecycle.

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, settings};

/// Apply request logging settings and install the tracing subscriber.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply_runtime_config(config);

    logging::init_subscriber(config)
}
