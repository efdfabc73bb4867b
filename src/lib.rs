// Library exports for pasa-splice-sites
pub mod nucleotide;
pub mod output;
pub mod pipeline;
pub mod splice;
pub mod strand;
pub mod validation;

pub use pipeline::{process_reader, retrieve_splice_sites, ExtractConfig, RunStats};
pub use splice::SpliceSite;
pub use strand::{infer_strand, Strand};
