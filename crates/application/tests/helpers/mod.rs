mod messages;
mod mock_upstream;

pub use messages::*;
pub use mock_upstream::*;
