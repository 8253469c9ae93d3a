//! Dawkins-style biomorphs for the terminal.
//!
//! The core is three small pieces: [`gene`] (a discretized, wrapping
//! scalar control), [`biomorph`] (the fixed bundle of ten genes
//! describing one shape, with one-step mutant offspring) and [`render`]
//! (recursive expansion of a biomorph into line segments in an abstract,
//! origin-centred space). Everything else is terminal UI around those
//! two entry points.

pub mod biomorph;
pub mod colors;
pub mod config;
pub mod explorer;
pub mod gene;
pub mod help;
pub mod render;
pub mod settings;
pub mod terminal;

pub use biomorph::Biomorph;
pub use gene::{Gene, GeneError};
pub use render::{generate, AbstractRender, Extent, Line};
