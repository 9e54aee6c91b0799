use serde::{Serialize, Deserialize};

use crate::errors::NetworkError;

/// One labeled training example: an input vector paired with its expected output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    input: Vec<f64>,
    output: Vec<f64>,
}

impl Data {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Data {
        Data { input, output }
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    /// Reads a JSON array of `{ "input": [...], "output": [...] }` objects.
    pub fn load_json(path: &str) -> Result<Vec<Data>, NetworkError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
