use serde::{Serialize, Deserialize};

/// A single activation value. Identified only by its slot in a [`Layer`](crate::Layer).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Neuron(f64);

impl Neuron {
    pub fn new(value: f64) -> Neuron {
        Neuron(value)
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    pub fn set(&mut self, value: f64) {
        self.0 = value;
    }
}
