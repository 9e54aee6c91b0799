use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::example::Data;
use crate::errors::NetworkError;

/// A bounded batch of examples trained as a unit until convergence.
#[derive(Debug, Clone, PartialEq)]
pub struct DataCluster {
    capacity: usize,
    examples: Vec<Data>,
}

impl DataCluster {
    pub fn new(capacity: usize) -> DataCluster {
        DataCluster {
            capacity,
            examples: Vec::with_capacity(capacity),
        }
    }

    /// Moves up to the remaining capacity from the front of `source` into the cluster.
    /// Returns how many examples were taken.
    pub fn add_data(&mut self, source: &mut Vec<Data>) -> usize {
        let take = (self.capacity - self.examples.len()).min(source.len());
        self.examples.extend(source.drain(..take));
        take
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[Data] {
        &self.examples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Data> {
        self.examples.iter()
    }
}

impl<'a> IntoIterator for &'a DataCluster {
    type Item = &'a Data;
    type IntoIter = std::slice::Iter<'a, Data>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}

/// Shuffles `examples` and splits them, in shuffled order, into clusters of
/// `cluster_size`. The last cluster holds the remainder and may be smaller.
pub fn partition<R: Rng + ?Sized>(
    mut examples: Vec<Data>,
    cluster_size: usize,
    rng: &mut R,
) -> Result<Vec<DataCluster>, NetworkError> {
    if cluster_size == 0 {
        return Err(NetworkError::invalid("cluster size must be at least 1"));
    }

    examples.shuffle(rng);

    let mut clusters = Vec::with_capacity(examples.len().div_ceil(cluster_size));
    while !examples.is_empty() {
        let mut cluster = DataCluster::new(cluster_size);
        cluster.add_data(&mut examples);
        clusters.push(cluster);
    }

    Ok(clusters)
}
