/// Request middleware
///
/// - `auth_guard`: bearer-token authentication guard run before every
///   protected handler

pub mod auth_guard;
