pub mod cancel;
pub(crate) mod janitor;
