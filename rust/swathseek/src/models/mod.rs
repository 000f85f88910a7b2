pub mod library;

pub use library::{
    LibraryEntry,
    Speclib,
};
