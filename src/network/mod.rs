pub mod network;
pub mod state;
pub mod weights;

pub use network::Network;
pub use state::NetworkState;
pub use weights::{feed_forward, Activations, WeightStore};
