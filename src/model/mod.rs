pub mod assembly;
pub mod contig;
