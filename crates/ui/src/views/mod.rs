mod auth;
mod guard;
mod header;
mod learn;
mod progress;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::AuthView;
pub use guard::SignInRequired;
pub use header::Header;
pub use learn::LearnView;
pub use progress::ProgressView;
pub use state::{ViewError, ViewState, view_state_from_resource};
