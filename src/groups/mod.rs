//! Ready-made modifier group catalogs for supported frameworks.

pub mod bootstrap;
