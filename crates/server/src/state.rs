use service::Services;

/// Shared handler state; cheap to clone per request.
#[derive(Clone)]
pub struct ServerState {
    pub services: Services,
}

impl ServerState {
    pub fn new(services: Services) -> Self { Self { services } }
}
