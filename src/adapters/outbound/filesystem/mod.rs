/// Filesystem adapters for conda-meta records, prefix files and output
mod conda_meta_reader;
mod file_writer;
mod prefix_walker;

pub use conda_meta_reader::{CondaMetaReader, CONDA_META_DIR};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use prefix_walker::PrefixWalker;
