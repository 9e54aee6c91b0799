pub mod bias;
pub mod layer;
pub mod neuron;

pub use bias::BiasWeightPair;
pub use layer::Layer;
pub use neuron::Neuron;
