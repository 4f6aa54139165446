//! Multi-file ingestion. Files are independent runs, so they are loaded in
//! parallel; records within one file are always parsed sequentially.

use std::path::{Path, PathBuf};

use corelib::IngestResult;
use rayon::prelude::*;

use crate::obj::{LoadOptions, ObjReader};

/// Outcome of loading one file of a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub result: IngestResult<ObjReader>,
}

/// Load every path in parallel. Results keep the input order and one
/// failing file does not affect the others.
pub fn load_many<P>(paths: &[P], options: LoadOptions) -> Vec<BatchEntry>
where
    P: AsRef<Path> + Sync,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = ObjReader::from_path(path, options);
            match &result {
                Ok(reader) => log::debug!(
                    "Loaded {}: {} vertices, {} triangles",
                    path.display(),
                    reader.vertices().len(),
                    reader.mesh().triangle_count()
                ),
                Err(err) => log::debug!("Failed to load {}: {}", path.display(), err),
            }
            BatchEntry {
                path: path.to_path_buf(),
                result,
            }
        })
        .collect()
}
