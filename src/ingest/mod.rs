/// Upstream data sources.
pub mod viva;

#[cfg(test)]
pub(crate) mod fixtures;
