//! Root collections over raw data sources.
//!
//! A root wraps either an in-memory sequence or a line-oriented text file and
//! splits it into contiguous index ranges, one per partition.

use crate::traits::{
    CollectionBase, CollectionError, CollectionResult, Data, Partition, next_collection_id,
};
use std::fmt::Debug;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// The contiguous slice of `0..data_len` owned by one partition.
pub(crate) fn partition_range(data_len: usize, num_partitions: usize, index: usize) -> Range<usize> {
    let partition_size = data_len.div_ceil(num_partitions.max(1));
    let start = (index * partition_size).min(data_len);
    let end = (start + partition_size).min(data_len);
    start..end
}

/// Root collection backed by an in-memory sequence.
pub struct SequenceCollection<T: Data> {
    id: usize,
    data: Arc<Vec<T>>,
    num_partitions: usize,
}

impl<T: Data> SequenceCollection<T> {
    pub fn new(data: Vec<T>, num_partitions: usize) -> Self {
        Self {
            id: next_collection_id(),
            data: Arc::new(data),
            num_partitions: num_partitions.max(1),
        }
    }
}

impl<T: Data> Debug for SequenceCollection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceCollection")
            .field("id", &self.id)
            .field("data_len", &self.data.len())
            .field("num_partitions", &self.num_partitions)
            .finish()
    }
}

impl<T: Data> CollectionBase for SequenceCollection<T> {
    type Item = T;

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<T>> {
        let index = partition.index();
        if index >= self.num_partitions {
            return Err(CollectionError::InvalidPartition(index));
        }

        let range = partition_range(self.data.len(), self.num_partitions, index);
        Ok(self.data[range].to_vec())
    }

    fn num_partitions(&self) -> usize {
        self.num_partitions
    }
}

/// Root collection over a newline-delimited text file, one element per line.
///
/// The path is validated for readability when the root is constructed, so a
/// missing source fails at construction rather than at evaluation time. The
/// file content itself is only read when an action runs.
#[derive(Debug)]
pub struct TextFileCollection {
    id: usize,
    path: PathBuf,
    num_partitions: usize,
}

impl TextFileCollection {
    pub fn open<P: AsRef<Path>>(path: P, num_partitions: usize) -> CollectionResult<Self> {
        let path = path.as_ref().to_path_buf();
        flint_common::io::open_readable(&path)?;
        debug!(path = %path.display(), "opened text source");

        Ok(Self {
            id: next_collection_id(),
            path,
            num_partitions: num_partitions.max(1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionBase for TextFileCollection {
    type Item = String;

    fn id(&self) -> usize {
        self.id
    }

    fn compute(&self, partition: &dyn Partition) -> CollectionResult<Vec<String>> {
        let index = partition.index();
        if index >= self.num_partitions {
            return Err(CollectionError::InvalidPartition(index));
        }

        let mut lines = flint_common::io::read_lines(&self.path)?;
        let range = partition_range(lines.len(), self.num_partitions, index);
        Ok(lines.drain(range).collect())
    }

    fn num_partitions(&self) -> usize {
        self.num_partitions
    }
}
