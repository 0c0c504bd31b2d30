pub mod relay_query;

pub use relay_query::{
    not_implemented_response, rewrite_upstream_response, RelayDecision, RelayOutcome,
    RelayQueryUseCase,
};
