mod cookie;
mod state;

pub use cookie::{
    clear_session_headers, new_session_correlator, new_session_headers, session_from_headers,
};
pub use state::{SessionState, resolve_session};
