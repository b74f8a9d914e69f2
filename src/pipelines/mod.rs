mod dataset;

pub use dataset::DatasetBuilder;
