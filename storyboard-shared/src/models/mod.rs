/// Database models
///
/// # Models
///
/// - `user`: accounts and credentials
/// - `board`: a user's board
/// - `story`: a story on a board
///
/// `Board` and `Story` implement the generic document traits and are served
/// through [`crate::crud::CrudService`]; `User` is reached only by the auth
/// paths and keeps its own inherent queries.

pub mod board;
pub mod story;
pub mod user;
