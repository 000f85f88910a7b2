pub mod apex_finding;
pub mod spectral_match;

pub use apex_finding::{
    find_apexes,
    ApexParams,
};
pub use spectral_match::SpectralMatcher;
